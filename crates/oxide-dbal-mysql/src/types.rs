//! Native type rendering.
//!
//! Turns a [`TypeDeclaration`] into the MySQL column type. Variable size
//! character and byte data is mapped onto the tiny/regular/medium/long
//! tiers by requested length.

use oxide_dbal_core::types::{
    BinaryOptions, ColumnType, DecimalOptions, Deprecation, IntegerOptions, IntegerWidth,
    LobOptions, StringOptions, TypeDeclaration, TypeSql,
};
use oxide_dbal_core::{DbalError, Result};

/// Length used for `VARCHAR`/`VARBINARY` declared without one.
pub const DEFAULT_LENGTH: u32 = 255;
/// Largest `CHAR` length.
pub const CHAR_MAX_LENGTH: u32 = 255;
/// Largest `VARCHAR` length.
pub const VARCHAR_MAX_LENGTH: u32 = 65535;
/// Largest `BINARY`/`VARBINARY` length.
pub const BINARY_MAX_LENGTH: u32 = 65535;
/// Precision used for `NUMERIC` declared without one.
pub const DEFAULT_PRECISION: u32 = 10;
/// Largest `NUMERIC` precision.
pub const DECIMAL_MAX_PRECISION: u32 = 65;
/// Largest `NUMERIC` scale.
pub const DECIMAL_MAX_SCALE: u32 = 30;

const LENGTH_LIMIT_TINY: u32 = 255;
const LENGTH_LIMIT_REGULAR: u32 = 65535;
const LENGTH_LIMIT_MEDIUM: u32 = 16_777_215;

/// Which logical types may carry a `DEFAULT` clause.
///
/// MySQL rejects literal defaults on TEXT, BLOB and JSON columns.
pub static DEFAULT_VALUE_SUPPORT: &[(ColumnType, bool)] = &[
    (ColumnType::SmallInt, true),
    (ColumnType::Integer, true),
    (ColumnType::BigInt, true),
    (ColumnType::Boolean, true),
    (ColumnType::Decimal, true),
    (ColumnType::Float, true),
    (ColumnType::String, true),
    (ColumnType::Text, false),
    (ColumnType::Guid, true),
    (ColumnType::Binary, true),
    (ColumnType::Blob, false),
    (ColumnType::Date, true),
    (ColumnType::DateTime, true),
    (ColumnType::DateTimeTz, true),
    (ColumnType::Time, true),
    (ColumnType::Json, false),
];

/// Whether columns of `column_type` may carry a default value.
#[must_use]
pub fn supports_default(column_type: ColumnType) -> bool {
    DEFAULT_VALUE_SUPPORT
        .iter()
        .find(|(candidate, _)| *candidate == column_type)
        .is_none_or(|(_, supported)| *supported)
}

#[derive(Clone, Copy)]
enum Lob {
    Text,
    Blob,
}

impl Lob {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
        }
    }
}

/// Picks the size tier of a large object for a requested length.
fn lob_tier(kind: Lob, length: Option<u32>) -> String {
    let prefix = match length.filter(|l| *l > 0) {
        Some(l) if l <= LENGTH_LIMIT_TINY => "TINY",
        Some(l) if l <= LENGTH_LIMIT_REGULAR => "",
        Some(l) if l <= LENGTH_LIMIT_MEDIUM => "MEDIUM",
        _ => "LONG",
    };
    format!("{prefix}{}", kind.suffix())
}

fn invalid(type_name: &str, reason: String) -> DbalError {
    DbalError::InvalidTypeOptions {
        type_name: type_name.to_string(),
        reason,
    }
}

fn integer(options: IntegerOptions) -> String {
    let mut sql = String::from(match options.width {
        IntegerWidth::Small => "SMALLINT",
        IntegerWidth::Regular => "INT",
        IntegerWidth::Big => "BIGINT",
    });
    if options.unsigned {
        sql.push_str(" UNSIGNED");
    }
    if options.autoincrement {
        sql.push_str(" AUTO_INCREMENT");
    }
    sql
}

fn string(options: StringOptions) -> Result<String> {
    let length = options.length.filter(|l| *l > 0).unwrap_or(DEFAULT_LENGTH);
    if length > VARCHAR_MAX_LENGTH {
        return Ok(lob_tier(Lob::Text, Some(length)));
    }
    if options.fixed {
        if length > CHAR_MAX_LENGTH {
            return Err(invalid(
                "string",
                format!("fixed length {length} exceeds the CHAR maximum of {CHAR_MAX_LENGTH}"),
            ));
        }
        return Ok(format!("CHAR({length})"));
    }
    Ok(format!("VARCHAR({length})"))
}

fn binary(options: BinaryOptions) -> TypeSql {
    let length = options.length.filter(|l| *l > 0).unwrap_or(DEFAULT_LENGTH);
    if length > BINARY_MAX_LENGTH {
        return TypeSql::deprecated(
            lob_tier(Lob::Blob, Some(length)),
            Deprecation::BinaryLengthExceeded {
                length,
                max: BINARY_MAX_LENGTH,
            },
        );
    }
    if options.fixed {
        TypeSql::new(format!("BINARY({length})"))
    } else {
        TypeSql::new(format!("VARBINARY({length})"))
    }
}

fn decimal(options: DecimalOptions) -> Result<String> {
    let precision = options
        .precision
        .filter(|p| *p > 0)
        .unwrap_or(DEFAULT_PRECISION);
    let scale = options.scale.unwrap_or(0);
    if precision > DECIMAL_MAX_PRECISION {
        return Err(invalid(
            "decimal",
            format!("precision {precision} exceeds {DECIMAL_MAX_PRECISION}"),
        ));
    }
    if scale > DECIMAL_MAX_SCALE {
        return Err(invalid(
            "decimal",
            format!("scale {scale} exceeds {DECIMAL_MAX_SCALE}"),
        ));
    }
    if scale > precision {
        return Err(invalid(
            "decimal",
            format!("scale {scale} is greater than precision {precision}"),
        ));
    }
    let mut sql = format!("NUMERIC({precision}, {scale})");
    if options.unsigned {
        sql.push_str(" UNSIGNED");
    }
    Ok(sql)
}

pub(crate) const fn date_time(version: bool) -> &'static str {
    if version {
        "TIMESTAMP"
    } else {
        "DATETIME"
    }
}

/// Renders the MySQL type for `declaration`.
pub fn render_type(declaration: &TypeDeclaration) -> Result<TypeSql> {
    let sql = match *declaration {
        TypeDeclaration::Integer(options) => integer(options),
        TypeDeclaration::Boolean => String::from("TINYINT(1)"),
        TypeDeclaration::Decimal(options) => decimal(options)?,
        TypeDeclaration::Float(options) => {
            if options.unsigned {
                String::from("DOUBLE PRECISION UNSIGNED")
            } else {
                String::from("DOUBLE PRECISION")
            }
        }
        TypeDeclaration::String(options) => string(options)?,
        TypeDeclaration::Guid => String::from("CHAR(36)"),
        TypeDeclaration::Text(LobOptions { length }) => lob_tier(Lob::Text, length),
        TypeDeclaration::Binary(options) => return Ok(binary(options)),
        TypeDeclaration::Blob(LobOptions { length }) => lob_tier(Lob::Blob, length),
        TypeDeclaration::Date => String::from("DATE"),
        TypeDeclaration::DateTime(options) | TypeDeclaration::DateTimeTz(options) => {
            date_time(options.version).to_string()
        }
        TypeDeclaration::Time => String::from("TIME"),
        TypeDeclaration::Json => String::from("JSON"),
    };
    Ok(TypeSql::new(sql))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_dbal_core::types::{DateTimeOptions, FloatOptions};

    fn sql(declaration: TypeDeclaration) -> String {
        render_type(&declaration).unwrap().sql
    }

    fn int(width: IntegerWidth, unsigned: bool, autoincrement: bool) -> TypeDeclaration {
        TypeDeclaration::Integer(IntegerOptions {
            width,
            unsigned,
            autoincrement,
        })
    }

    #[test]
    fn test_integers() {
        assert_eq!(sql(int(IntegerWidth::Regular, false, false)), "INT");
        assert_eq!(
            sql(int(IntegerWidth::Regular, false, true)),
            "INT AUTO_INCREMENT"
        );
        assert_eq!(
            sql(int(IntegerWidth::Small, true, false)),
            "SMALLINT UNSIGNED"
        );
        assert_eq!(
            sql(int(IntegerWidth::Big, true, true)),
            "BIGINT UNSIGNED AUTO_INCREMENT"
        );
    }

    #[test]
    fn test_strings() {
        let string = |length, fixed| TypeDeclaration::String(StringOptions { length, fixed });
        assert_eq!(sql(string(Some(10), true)), "CHAR(10)");
        assert_eq!(sql(string(Some(50), false)), "VARCHAR(50)");
        assert_eq!(sql(string(None, false)), "VARCHAR(255)");
        assert_eq!(sql(string(Some(0), false)), "VARCHAR(255)");
        assert_eq!(sql(string(Some(65535), false)), "VARCHAR(65535)");
        assert_eq!(sql(string(Some(65536), false)), "MEDIUMTEXT");
        assert!(render_type(&string(Some(256), true)).is_err());
    }

    #[test]
    fn test_text_tiers() {
        let text = |length| TypeDeclaration::Text(LobOptions { length });
        assert_eq!(sql(text(Some(1))), "TINYTEXT");
        assert_eq!(sql(text(Some(255))), "TINYTEXT");
        assert_eq!(sql(text(Some(256))), "TEXT");
        assert_eq!(sql(text(Some(65535))), "TEXT");
        assert_eq!(sql(text(Some(65536))), "MEDIUMTEXT");
        assert_eq!(sql(text(Some(16_777_215))), "MEDIUMTEXT");
        assert_eq!(sql(text(Some(16_777_216))), "LONGTEXT");
        assert_eq!(sql(text(None)), "LONGTEXT");
        assert_eq!(sql(text(Some(0))), "LONGTEXT");
    }

    #[test]
    fn test_blob_tiers() {
        let blob = |length| TypeDeclaration::Blob(LobOptions { length });
        assert_eq!(sql(blob(Some(1))), "TINYBLOB");
        assert_eq!(sql(blob(Some(255))), "TINYBLOB");
        assert_eq!(sql(blob(Some(256))), "BLOB");
        assert_eq!(sql(blob(Some(65535))), "BLOB");
        assert_eq!(sql(blob(Some(65536))), "MEDIUMBLOB");
        assert_eq!(sql(blob(Some(16_777_215))), "MEDIUMBLOB");
        assert_eq!(sql(blob(Some(16_777_216))), "LONGBLOB");
        assert_eq!(sql(blob(None)), "LONGBLOB");
    }

    #[test]
    fn test_binary() {
        let binary = |length, fixed| TypeDeclaration::Binary(BinaryOptions { length, fixed });
        assert_eq!(sql(binary(None, false)), "VARBINARY(255)");
        assert_eq!(sql(binary(Some(0), false)), "VARBINARY(255)");
        assert_eq!(sql(binary(Some(65535), false)), "VARBINARY(65535)");
        assert_eq!(sql(binary(None, true)), "BINARY(255)");
        assert_eq!(sql(binary(Some(0), true)), "BINARY(255)");
        assert_eq!(sql(binary(Some(65535), true)), "BINARY(65535)");
    }

    #[test]
    fn test_binary_longer_than_max_falls_back_to_blob() {
        let cases = [
            (65536, "MEDIUMBLOB"),
            (16_777_215, "MEDIUMBLOB"),
            (16_777_216, "LONGBLOB"),
        ];
        for fixed in [false, true] {
            for (length, expected) in cases {
                let rendered = render_type(&TypeDeclaration::Binary(BinaryOptions {
                    length: Some(length),
                    fixed,
                }))
                .unwrap();
                assert_eq!(rendered.sql, expected);
                assert_eq!(
                    rendered.deprecation,
                    Some(Deprecation::BinaryLengthExceeded { length, max: 65535 })
                );
            }
        }
    }

    #[test]
    fn test_binary_deprecation_message() {
        let deprecation = Deprecation::BinaryLengthExceeded {
            length: 65536,
            max: 65535,
        };
        assert_eq!(
            deprecation.to_string(),
            "Binary field length 65536 is greater than supported by the platform (65535). \
             Reduce the field length or use a BLOB field instead."
        );
    }

    #[test]
    fn test_decimal() {
        let decimal = |precision, scale, unsigned| {
            TypeDeclaration::Decimal(DecimalOptions {
                precision,
                scale,
                unsigned,
            })
        };
        assert_eq!(sql(decimal(None, None, false)), "NUMERIC(10, 0)");
        assert_eq!(sql(decimal(None, None, true)), "NUMERIC(10, 0) UNSIGNED");
        assert_eq!(sql(decimal(Some(5), None, false)), "NUMERIC(5, 0)");
        assert_eq!(sql(decimal(None, Some(5), false)), "NUMERIC(10, 5)");
        assert_eq!(sql(decimal(Some(8), Some(2), false)), "NUMERIC(8, 2)");

        assert!(render_type(&decimal(Some(5), Some(6), false)).is_err());
        assert!(render_type(&decimal(Some(66), None, false)).is_err());
        assert!(render_type(&decimal(Some(65), Some(31), false)).is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(
            sql(TypeDeclaration::Float(FloatOptions { unsigned: false })),
            "DOUBLE PRECISION"
        );
        assert_eq!(
            sql(TypeDeclaration::Float(FloatOptions { unsigned: true })),
            "DOUBLE PRECISION UNSIGNED"
        );
    }

    #[test]
    fn test_date_time_and_misc() {
        let plain = DateTimeOptions { version: false };
        let version = DateTimeOptions { version: true };
        assert_eq!(sql(TypeDeclaration::DateTime(plain)), "DATETIME");
        assert_eq!(sql(TypeDeclaration::DateTime(version)), "TIMESTAMP");
        assert_eq!(sql(TypeDeclaration::DateTimeTz(plain)), "DATETIME");
        assert_eq!(sql(TypeDeclaration::Date), "DATE");
        assert_eq!(sql(TypeDeclaration::Time), "TIME");
        assert_eq!(sql(TypeDeclaration::Guid), "CHAR(36)");
        assert_eq!(sql(TypeDeclaration::Boolean), "TINYINT(1)");
        assert_eq!(sql(TypeDeclaration::Json), "JSON");
    }

    #[test]
    fn test_default_value_support() {
        assert!(supports_default(ColumnType::String));
        assert!(supports_default(ColumnType::Integer));
        assert!(!supports_default(ColumnType::Text));
        assert!(!supports_default(ColumnType::Blob));
        assert!(!supports_default(ColumnType::Json));
        assert_eq!(DEFAULT_VALUE_SUPPORT.len(), ColumnType::ALL.len());
    }
}

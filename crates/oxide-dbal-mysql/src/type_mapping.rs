//! Native MySQL type names and the logical types they read back as.

use oxide_dbal_core::types::ColumnType;

use crate::platform::MySqlPlatform;

/// Native type name (lowercase) to logical type.
pub static TYPE_MAPPING: &[(&str, ColumnType)] = &[
    ("tinyint", ColumnType::Boolean),
    ("smallint", ColumnType::SmallInt),
    ("mediumint", ColumnType::Integer),
    ("int", ColumnType::Integer),
    ("integer", ColumnType::Integer),
    ("bigint", ColumnType::BigInt),
    ("tinytext", ColumnType::Text),
    ("text", ColumnType::Text),
    ("mediumtext", ColumnType::Text),
    ("longtext", ColumnType::Text),
    ("varchar", ColumnType::String),
    ("string", ColumnType::String),
    ("char", ColumnType::String),
    ("date", ColumnType::Date),
    ("year", ColumnType::Date),
    ("datetime", ColumnType::DateTime),
    ("timestamp", ColumnType::DateTime),
    ("time", ColumnType::Time),
    ("float", ColumnType::Float),
    ("double", ColumnType::Float),
    ("real", ColumnType::Float),
    ("decimal", ColumnType::Decimal),
    ("numeric", ColumnType::Decimal),
    ("tinyblob", ColumnType::Blob),
    ("blob", ColumnType::Blob),
    ("mediumblob", ColumnType::Blob),
    ("longblob", ColumnType::Blob),
    ("binary", ColumnType::Binary),
    ("varbinary", ColumnType::Binary),
    ("json", ColumnType::Json),
];

/// Logical type of a native type name, ignoring case and surrounding
/// whitespace.
#[must_use]
pub fn logical_type_for(native: &str) -> Option<ColumnType> {
    let native = native.trim();
    TYPE_MAPPING
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(native))
        .map(|&(_, column_type)| column_type)
}

impl MySqlPlatform {
    /// Whether `native` is a known MySQL type name.
    #[must_use]
    pub fn has_type_mapping_for(&self, native: &str) -> bool {
        logical_type_for(native).is_some()
    }

    /// Logical type of the MySQL type `native`.
    #[must_use]
    pub fn type_mapping(&self, native: &str) -> Option<ColumnType> {
        logical_type_for(native)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_types() {
        let platform = MySqlPlatform::new();
        assert!(platform.has_type_mapping_for("binary"));
        assert!(platform.has_type_mapping_for("varbinary"));
        assert_eq!(platform.type_mapping("binary"), Some(ColumnType::Binary));
        assert_eq!(platform.type_mapping("varbinary"), Some(ColumnType::Binary));
    }

    #[test]
    fn test_lob_tiers() {
        for native in ["tinytext", "text", "mediumtext", "longtext"] {
            assert_eq!(logical_type_for(native), Some(ColumnType::Text));
        }
        for native in ["tinyblob", "blob", "mediumblob", "longblob"] {
            assert_eq!(logical_type_for(native), Some(ColumnType::Blob));
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(logical_type_for("VARCHAR"), Some(ColumnType::String));
        assert_eq!(logical_type_for(" DateTime "), Some(ColumnType::DateTime));
        assert_eq!(logical_type_for("geometry"), None);
    }
}

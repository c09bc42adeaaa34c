//! Logical column types and typed declaration options.
//!
//! A [`Column`](crate::schema::Column) carries a [`ColumnType`] plus a
//! handful of generic attributes. Before rendering, the column is turned
//! into a [`TypeDeclaration`]: a closed enum with one option struct per
//! type category, so a platform renderer only ever sees the options that
//! make sense for the category it is rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DbalError;

/// Logical (platform independent) column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 16 bit integer.
    SmallInt,
    /// 32 bit integer.
    Integer,
    /// 64 bit integer.
    BigInt,
    /// Boolean flag.
    Boolean,
    /// Exact fixed-point number.
    Decimal,
    /// Floating point number.
    Float,
    /// Character string with a length limit.
    String,
    /// Character large object.
    Text,
    /// Globally unique identifier stored as text.
    Guid,
    /// Byte string with a length limit.
    Binary,
    /// Binary large object.
    Blob,
    /// Calendar date.
    Date,
    /// Date and time without zone.
    DateTime,
    /// Date and time with zone.
    DateTimeTz,
    /// Time of day.
    Time,
    /// JSON document.
    Json,
}

impl ColumnType {
    /// Every logical type, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::SmallInt,
        Self::Integer,
        Self::BigInt,
        Self::Boolean,
        Self::Decimal,
        Self::Float,
        Self::String,
        Self::Text,
        Self::Guid,
        Self::Binary,
        Self::Blob,
        Self::Date,
        Self::DateTime,
        Self::DateTimeTz,
        Self::Time,
        Self::Json,
    ];

    /// Returns the canonical lowercase name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SmallInt => "smallint",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::String => "string",
            Self::Text => "text",
            Self::Guid => "guid",
            Self::Binary => "binary",
            Self::Blob => "blob",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::DateTimeTz => "datetimetz",
            Self::Time => "time",
            Self::Json => "json",
        }
    }

    /// Integer types whose default values render without quotes.
    #[must_use]
    pub const fn is_integer_mapped(self) -> bool {
        matches!(self, Self::SmallInt | Self::Integer)
    }

    /// Types that carry an optional length limit compared by the comparator.
    #[must_use]
    pub const fn has_length(self) -> bool {
        matches!(self, Self::String | Self::Binary)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = DbalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == lower)
            .ok_or_else(|| DbalError::UnknownColumnType(s.to_string()))
    }
}

/// Default value of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum DefaultValue {
    /// Boolean default.
    Boolean(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default, rendered as a string literal.
    String(String),
    /// Raw SQL expression (e.g. `CURRENT_TIMESTAMP`), rendered verbatim.
    Expression(String),
}

impl DefaultValue {
    /// Textual form of the value, used for comparison and rendering.
    #[must_use]
    pub fn literal_text(&self) -> String {
        match self {
            Self::Boolean(b) => u8::from(*b).to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) | Self::Expression(s) => s.clone(),
        }
    }

    /// Converts the value to the `0`/`1` form used for boolean columns.
    #[must_use]
    pub fn boolean_text(&self) -> String {
        match self {
            Self::Boolean(b) => u8::from(*b).to_string(),
            Self::Integer(i) => u8::from(*i != 0).to_string(),
            Self::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" => String::from("1"),
                "false" => String::from("0"),
                _ => s.clone(),
            },
            other => other.literal_text(),
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Storage width of an integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerWidth {
    /// 16 bit.
    Small,
    /// 32 bit.
    Regular,
    /// 64 bit.
    Big,
}

/// Options of integer declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerOptions {
    /// Storage width.
    pub width: IntegerWidth,
    /// Whether negative values are excluded.
    pub unsigned: bool,
    /// Whether the column is an identity column.
    pub autoincrement: bool,
}

/// Options of character string declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringOptions {
    /// Maximum length; `None` or `Some(0)` selects the platform default.
    pub length: Option<u32>,
    /// Fixed-width storage.
    pub fixed: bool,
}

/// Options of byte string declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinaryOptions {
    /// Maximum length; `None` or `Some(0)` selects the platform default.
    pub length: Option<u32>,
    /// Fixed-width storage.
    pub fixed: bool,
}

/// Options of large object declarations (text and blob).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LobOptions {
    /// Requested capacity; selects the size tier.
    pub length: Option<u32>,
}

/// Options of fixed-point declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecimalOptions {
    /// Total number of digits, defaults to 10.
    pub precision: Option<u32>,
    /// Digits after the decimal point, defaults to 0.
    pub scale: Option<u32>,
    /// Whether negative values are excluded.
    pub unsigned: bool,
}

/// Options of floating point declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatOptions {
    /// Whether negative values are excluded.
    pub unsigned: bool,
}

/// Options of date-time declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeOptions {
    /// Version columns are maintained by the database on every update.
    pub version: bool,
}

/// A fully typed request to render a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclaration {
    /// Integer types.
    Integer(IntegerOptions),
    /// Boolean.
    Boolean,
    /// Fixed-point.
    Decimal(DecimalOptions),
    /// Floating point.
    Float(FloatOptions),
    /// Character string.
    String(StringOptions),
    /// GUID.
    Guid,
    /// Character large object.
    Text(LobOptions),
    /// Byte string.
    Binary(BinaryOptions),
    /// Binary large object.
    Blob(LobOptions),
    /// Date.
    Date,
    /// Date-time without zone.
    DateTime(DateTimeOptions),
    /// Date-time with zone.
    DateTimeTz(DateTimeOptions),
    /// Time.
    Time,
    /// JSON.
    Json,
}

/// Soft warning raised while rendering a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    /// A binary length above the platform maximum; rendered as a blob.
    BinaryLengthExceeded {
        /// Requested length.
        length: u32,
        /// Platform maximum for binary columns.
        max: u32,
    },
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BinaryLengthExceeded { length, max } => write!(
                f,
                "Binary field length {length} is greater than supported by the platform ({max}). \
                 Reduce the field length or use a BLOB field instead."
            ),
        }
    }
}

/// A rendered native type together with any deprecation it triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSql {
    /// Native type declaration.
    pub sql: String,
    /// Deprecation raised while rendering, if any.
    pub deprecation: Option<Deprecation>,
}

impl TypeSql {
    /// A rendering without deprecation.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            deprecation: None,
        }
    }

    /// A rendering that degraded and must be reported.
    #[must_use]
    pub fn deprecated(sql: impl Into<String>, deprecation: Deprecation) -> Self {
        Self {
            sql: sql.into(),
            deprecation: Some(deprecation),
        }
    }
}

//! Table columns.

use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;
use crate::platform::Platform;
use crate::types::{
    BinaryOptions, ColumnType, DateTimeOptions, DecimalOptions, DefaultValue, FloatOptions,
    IntegerOptions, IntegerWidth, LobOptions, StringOptions, TypeDeclaration,
};

/// Platform specific column attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformOptions {
    /// Column character set.
    pub charset: Option<String>,
    /// Column collation.
    pub collation: Option<String>,
    /// Version column (rendered as an auto-updated timestamp).
    pub version: bool,
}

/// A column of a [`Table`](super::Table).
///
/// New columns are `NOT NULL` without default, matching what most schema
/// definitions expect.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: Identifier,
    column_type: ColumnType,
    length: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
    unsigned: bool,
    fixed: bool,
    not_null: bool,
    default: Option<DefaultValue>,
    autoincrement: bool,
    comment: Option<String>,
    platform_options: PlatformOptions,
}

impl Column {
    /// Creates a column with default options.
    #[must_use]
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: Identifier::new(name),
            column_type,
            length: None,
            precision: None,
            scale: None,
            unsigned: false,
            fixed: false,
            not_null: true,
            default: None,
            autoincrement: false,
            comment: None,
            platform_options: PlatformOptions::default(),
        }
    }

    /// Unquoted column name.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.name()
    }

    /// The column identifier.
    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.name
    }

    /// Name rendered for `platform`.
    #[must_use]
    pub fn quoted_name<P: Platform + ?Sized>(&self, platform: &P) -> String {
        self.name.quoted_name(platform)
    }

    /// Logical type.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Declared length.
    #[must_use]
    pub const fn length(&self) -> Option<u32> {
        self.length
    }

    /// Declared precision.
    #[must_use]
    pub const fn precision(&self) -> Option<u32> {
        self.precision
    }

    /// Declared scale.
    #[must_use]
    pub const fn scale(&self) -> Option<u32> {
        self.scale
    }

    #[must_use]
    pub const fn unsigned(&self) -> bool {
        self.unsigned
    }

    #[must_use]
    pub const fn fixed(&self) -> bool {
        self.fixed
    }

    #[must_use]
    pub const fn not_null(&self) -> bool {
        self.not_null
    }

    #[must_use]
    pub const fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub const fn autoincrement(&self) -> bool {
        self.autoincrement
    }

    /// Column comment; empty comments are reported as `None`.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }

    #[must_use]
    pub const fn platform_options(&self) -> &PlatformOptions {
        &self.platform_options
    }

    pub fn set_type(&mut self, column_type: ColumnType) -> &mut Self {
        self.column_type = column_type;
        self
    }

    pub fn set_length(&mut self, length: Option<u32>) -> &mut Self {
        self.length = length;
        self
    }

    pub fn set_precision(&mut self, precision: Option<u32>) -> &mut Self {
        self.precision = precision;
        self
    }

    pub fn set_scale(&mut self, scale: Option<u32>) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn set_unsigned(&mut self, unsigned: bool) -> &mut Self {
        self.unsigned = unsigned;
        self
    }

    pub fn set_fixed(&mut self, fixed: bool) -> &mut Self {
        self.fixed = fixed;
        self
    }

    pub fn set_not_null(&mut self, not_null: bool) -> &mut Self {
        self.not_null = not_null;
        self
    }

    pub fn set_default(&mut self, default: Option<DefaultValue>) -> &mut Self {
        self.default = default;
        self
    }

    pub fn set_autoincrement(&mut self, autoincrement: bool) -> &mut Self {
        self.autoincrement = autoincrement;
        self
    }

    pub fn set_comment(&mut self, comment: Option<&str>) -> &mut Self {
        self.comment = comment.map(str::to_string);
        self
    }

    pub fn set_charset(&mut self, charset: Option<&str>) -> &mut Self {
        self.platform_options.charset = charset.map(str::to_string);
        self
    }

    pub fn set_collation(&mut self, collation: Option<&str>) -> &mut Self {
        self.platform_options.collation = collation.map(str::to_string);
        self
    }

    pub fn set_version(&mut self, version: bool) -> &mut Self {
        self.platform_options.version = version;
        self
    }

    pub fn set_platform_options(&mut self, options: PlatformOptions) -> &mut Self {
        self.platform_options = options;
        self
    }

    /// Builds the typed declaration handed to the platform type renderer.
    #[must_use]
    pub fn type_declaration(&self) -> TypeDeclaration {
        let integer = |width| {
            TypeDeclaration::Integer(IntegerOptions {
                width,
                unsigned: self.unsigned,
                autoincrement: self.autoincrement,
            })
        };
        let date_time = DateTimeOptions {
            version: self.platform_options.version,
        };
        match self.column_type {
            ColumnType::SmallInt => integer(IntegerWidth::Small),
            ColumnType::Integer => integer(IntegerWidth::Regular),
            ColumnType::BigInt => integer(IntegerWidth::Big),
            ColumnType::Boolean => TypeDeclaration::Boolean,
            ColumnType::Decimal => TypeDeclaration::Decimal(DecimalOptions {
                precision: self.precision,
                scale: self.scale,
                unsigned: self.unsigned,
            }),
            ColumnType::Float => TypeDeclaration::Float(FloatOptions {
                unsigned: self.unsigned,
            }),
            ColumnType::String => TypeDeclaration::String(StringOptions {
                length: self.length,
                fixed: self.fixed,
            }),
            ColumnType::Text => TypeDeclaration::Text(LobOptions {
                length: self.length,
            }),
            ColumnType::Guid => TypeDeclaration::Guid,
            ColumnType::Binary => TypeDeclaration::Binary(BinaryOptions {
                length: self.length,
                fixed: self.fixed,
            }),
            ColumnType::Blob => TypeDeclaration::Blob(LobOptions {
                length: self.length,
            }),
            ColumnType::Date => TypeDeclaration::Date,
            ColumnType::DateTime => TypeDeclaration::DateTime(date_time),
            ColumnType::DateTimeTz => TypeDeclaration::DateTimeTz(date_time),
            ColumnType::Time => TypeDeclaration::Time,
            ColumnType::Json => TypeDeclaration::Json,
        }
    }
}

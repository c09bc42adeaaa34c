//! JSON table definitions.
//!
//! A definition names the table, lists its columns and optionally its
//! primary key, indexes, foreign keys and table options:
//!
//! ```json
//! {
//!   "name": "users",
//!   "columns": [
//!     { "name": "id", "type": "integer", "autoincrement": true },
//!     { "name": "email", "type": "string", "length": 180 },
//!     { "name": "bio", "type": "text", "nullable": true }
//!   ],
//!   "primary_key": ["id"],
//!   "indexes": [{ "columns": ["email"], "unique": true }],
//!   "options": { "engine": "InnoDB" }
//! }
//! ```

use serde::Deserialize;
use tracing::debug;

use oxide_dbal_core::{
    Column, ColumnType, DefaultValue, ForeignKeyAction, ForeignKeyMatch, ForeignKeyOptions,
    IndexFlag, PlatformOptions, Table, TableOptions,
};

use crate::error::Result;

/// A table as written in a definition file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDefinition>,
    #[serde(default)]
    pub options: TableOptions,
}

/// A column; every attribute but name and type is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub unsigned: bool,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub autoincrement: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, flatten)]
    pub platform_options: PlatformOptions,
}

/// An index; the name is generated when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexDefinition {
    #[serde(default)]
    pub name: Option<String>,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub flags: Vec<IndexFlag>,
}

/// A foreign key; the name is generated when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForeignKeyDefinition {
    #[serde(default)]
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub foreign_table: String,
    pub foreign_columns: Vec<String>,
    #[serde(default)]
    pub on_delete: Option<ForeignKeyAction>,
    #[serde(default)]
    pub on_update: Option<ForeignKeyAction>,
    #[serde(default, rename = "match")]
    pub match_kind: Option<ForeignKeyMatch>,
}

impl ColumnDefinition {
    fn to_column(&self) -> Column {
        let mut column = Column::new(&self.name, self.column_type);
        column
            .set_length(self.length)
            .set_precision(self.precision)
            .set_scale(self.scale)
            .set_unsigned(self.unsigned)
            .set_fixed(self.fixed)
            .set_not_null(!self.nullable)
            .set_default(self.default.clone())
            .set_autoincrement(self.autoincrement)
            .set_comment(self.comment.as_deref())
            .set_platform_options(self.platform_options.clone());
        column
    }
}

impl TableDefinition {
    /// Builds the table. Generated index and constraint names are limited
    /// to `max_identifier_length` characters.
    pub fn to_table(&self, max_identifier_length: usize) -> Result<Table> {
        let mut table = Table::new(&self.name);
        table.set_max_identifier_length(max_identifier_length);
        *table.options_mut() = self.options.clone();

        for column in &self.columns {
            table.add_column_definition(column.to_column())?;
        }
        if !self.primary_key.is_empty() {
            table.set_primary_key(self.primary_key.as_slice())?;
        }
        for index in &self.indexes {
            let created = if index.unique {
                table.add_unique_index(index.columns.as_slice(), index.name.as_deref())?
            } else {
                table.add_index(index.columns.as_slice(), index.name.as_deref())?
            };
            for flag in &index.flags {
                created.add_flag(*flag);
            }
        }
        for foreign_key in &self.foreign_keys {
            let options = ForeignKeyOptions {
                on_delete: foreign_key.on_delete,
                on_update: foreign_key.on_update,
                match_kind: foreign_key.match_kind,
            };
            table.add_foreign_key(
                &foreign_key.foreign_table,
                foreign_key.columns.as_slice(),
                foreign_key.foreign_columns.as_slice(),
                options,
                foreign_key.name.as_deref(),
            )?;
        }

        debug!(
            table = %self.name,
            columns = table.columns().len(),
            indexes = table.indexes().len(),
            foreign_keys = table.foreign_keys().len(),
            "loaded table definition"
        );
        Ok(table)
    }
}

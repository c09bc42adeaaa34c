//! Tables: ordered columns plus indexes, foreign keys and options.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DbalError, Result};
use crate::identifier::Identifier;
use crate::naming::{generate_identifier_name, DEFAULT_MAX_IDENTIFIER_LENGTH};
use crate::platform::Platform;
use crate::types::ColumnType;

use super::column::Column;
use super::foreign_key::{ForeignKeyConstraint, ForeignKeyOptions};
use super::index::Index;

/// Name given to primary keys created without an explicit name.
pub const PRIMARY_KEY_NAME: &str = "primary";

/// Table level options understood by the platforms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Storage engine (e.g. `InnoDB`).
    pub engine: Option<String>,
    /// Default character set of the table.
    pub charset: Option<String>,
    /// Default collation of the table.
    pub collate: Option<String>,
    /// Initial auto increment value.
    pub auto_increment: Option<u64>,
    /// Table comment.
    pub comment: Option<String>,
    /// Row format (e.g. `DYNAMIC`).
    pub row_format: Option<String>,
    /// Create as a temporary table.
    pub temporary: bool,
}

/// A table definition.
///
/// Columns keep their insertion order. Index and foreign key names are
/// case-insensitive, as are column lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: Identifier,
    columns: Vec<Column>,
    indexes: Vec<Index>,
    implicit_indexes: Vec<String>,
    foreign_keys: Vec<ForeignKeyConstraint>,
    primary_key_name: Option<String>,
    options: TableOptions,
    max_identifier_length: usize,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Identifier::new(name),
            columns: Vec::new(),
            indexes: Vec::new(),
            implicit_indexes: Vec::new(),
            foreign_keys: Vec::new(),
            primary_key_name: None,
            options: TableOptions::default(),
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
        }
    }

    /// Creates a table from prepared parts.
    pub fn with_parts(
        name: &str,
        columns: Vec<Column>,
        indexes: Vec<Index>,
        foreign_keys: Vec<ForeignKeyConstraint>,
        options: TableOptions,
    ) -> Result<Self> {
        let mut table = Self::new(name);
        table.options = options;
        for column in columns {
            table.add_column_definition(column)?;
        }
        for index in indexes {
            table.insert_index(index)?;
        }
        for foreign_key in foreign_keys {
            table.insert_foreign_key(foreign_key)?;
        }
        Ok(table)
    }

    /// Unquoted table name.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.name()
    }

    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.name
    }

    #[must_use]
    pub fn quoted_name<P: Platform + ?Sized>(&self, platform: &P) -> String {
        self.name.quoted_name(platform)
    }

    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut TableOptions {
        &mut self.options
    }

    /// Sets the length limit for generated index and constraint names.
    pub fn set_max_identifier_length(&mut self, length: usize) -> &mut Self {
        self.max_identifier_length = length;
        self
    }

    // ================================================================
    // Columns
    // ================================================================

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.identifier().matches(name))
    }

    /// Adds a column and returns it for further configuration.
    pub fn add_column(&mut self, name: &str, column_type: ColumnType) -> Result<&mut Column> {
        self.add_column_definition(Column::new(name, column_type))
    }

    /// Adds a prepared column.
    pub fn add_column_definition(&mut self, column: Column) -> Result<&mut Column> {
        if self.column_position(&column.name()).is_some() {
            return Err(DbalError::ColumnAlreadyExists {
                column: column.name(),
                table: self.name(),
            });
        }
        let position = self.columns.len();
        self.columns.push(column);
        Ok(&mut self.columns[position])
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.column_position(name)
            .map(|position| &self.columns[position])
            .ok_or_else(|| self.missing_column(name))
    }

    pub fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        match self.column_position(name) {
            Some(position) => Ok(&mut self.columns[position]),
            None => Err(self.missing_column(name)),
        }
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Removes a column if present.
    pub fn drop_column(&mut self, name: &str) -> &mut Self {
        if let Some(position) = self.column_position(name) {
            self.columns.remove(position);
        }
        self
    }

    fn missing_column(&self, name: &str) -> DbalError {
        DbalError::ColumnDoesNotExist {
            column: name.to_string(),
            table: self.name(),
        }
    }

    // ================================================================
    // Indexes
    // ================================================================

    fn index_position(&self, name: &str) -> Option<usize> {
        self.indexes
            .iter()
            .position(|index| index.identifier().matches(name))
    }

    fn generated_name<S: AsRef<str>>(&self, columns: &[S], prefix: &str) -> String {
        let table_name = self.name();
        let mut names = vec![table_name.as_str()];
        names.extend(columns.iter().map(AsRef::as_ref));
        generate_identifier_name(&names, prefix, self.max_identifier_length)
    }

    fn create_index<S: AsRef<str>>(
        &self,
        columns: &[S],
        name: &str,
        unique: bool,
        primary: bool,
    ) -> Result<Index> {
        if columns.is_empty() {
            return Err(DbalError::IncompleteDefinition(format!("index {name}")));
        }
        if let Some(missing) = columns.iter().find(|c| !self.has_column(c.as_ref())) {
            return Err(self.missing_column(missing.as_ref()));
        }
        Ok(Index::new(name, columns, unique, primary))
    }

    fn insert_index(&mut self, candidate: Index) -> Result<&mut Index> {
        let key = candidate.identifier().normalized();
        let replaced: Vec<String> = self
            .implicit_indexes
            .iter()
            .filter(|name| {
                self.index_position(name)
                    .is_some_and(|position| self.indexes[position].is_fulfilled_by(&candidate))
            })
            .cloned()
            .collect();

        let name_taken = self.index_position(&key).is_some() && !replaced.contains(&key);
        let second_primary = candidate.is_primary() && self.primary_key().is_some();
        if name_taken || second_primary {
            return Err(DbalError::IndexAlreadyExists {
                index: candidate.name(),
                table: self.name(),
            });
        }

        for name in &replaced {
            debug!(table = %self.name, index = %name, "replacing implicit index");
            if let Some(position) = self.index_position(name) {
                self.indexes.remove(position);
            }
            self.implicit_indexes.retain(|implicit| implicit != name);
        }

        if candidate.is_primary() {
            self.primary_key_name = Some(key);
        }
        let position = self.indexes.len();
        self.indexes.push(candidate);
        Ok(&mut self.indexes[position])
    }

    /// Adds a plain index; a name is generated when none is given.
    pub fn add_index<S: AsRef<str>>(
        &mut self,
        columns: &[S],
        name: Option<&str>,
    ) -> Result<&mut Index> {
        let name = name.map_or_else(|| self.generated_name(columns, "idx"), str::to_string);
        let index = self.create_index(columns, &name, false, false)?;
        self.insert_index(index)
    }

    /// Adds a unique index; a name is generated when none is given.
    pub fn add_unique_index<S: AsRef<str>>(
        &mut self,
        columns: &[S],
        name: Option<&str>,
    ) -> Result<&mut Index> {
        let name = name.map_or_else(|| self.generated_name(columns, "uniq"), str::to_string);
        let index = self.create_index(columns, &name, true, false)?;
        self.insert_index(index)
    }

    /// Sets the primary key under the default name `primary`.
    pub fn set_primary_key<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<&mut Self> {
        self.set_primary_key_named(columns, PRIMARY_KEY_NAME)
    }

    /// Sets the primary key; its columns become `NOT NULL`.
    pub fn set_primary_key_named<S: AsRef<str>>(
        &mut self,
        columns: &[S],
        name: &str,
    ) -> Result<&mut Self> {
        let index = self.create_index(columns, name, true, true)?;
        self.insert_index(index)?;
        for column in columns {
            self.column_mut(column.as_ref())?.set_not_null(true);
        }
        Ok(self)
    }

    /// Removes the primary key index, if any.
    pub fn drop_primary_key(&mut self) -> &mut Self {
        if let Some(name) = self.primary_key_name.take() {
            if let Some(position) = self.index_position(&name) {
                self.indexes.remove(position);
            }
        }
        self
    }

    #[must_use]
    pub fn primary_key(&self) -> Option<&Index> {
        let name = self.primary_key_name.as_ref()?;
        self.index_position(name)
            .map(|position| &self.indexes[position])
    }

    #[must_use]
    pub fn has_primary_key(&self) -> bool {
        self.primary_key().is_some()
    }

    #[must_use]
    pub fn primary_key_columns(&self) -> Vec<String> {
        self.primary_key().map(Index::columns).unwrap_or_default()
    }

    #[must_use]
    pub fn has_index(&self, name: &str) -> bool {
        self.index_position(name).is_some()
    }

    pub fn index(&self, name: &str) -> Result<&Index> {
        self.index_position(name)
            .map(|position| &self.indexes[position])
            .ok_or_else(|| DbalError::IndexDoesNotExist {
                index: name.to_string(),
                table: self.name(),
            })
    }

    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Removes an index by name.
    pub fn drop_index(&mut self, name: &str) -> Result<&mut Self> {
        let position = self
            .index_position(name)
            .ok_or_else(|| DbalError::IndexDoesNotExist {
                index: name.to_string(),
                table: self.name(),
            })?;
        let removed = self.indexes.remove(position);
        let key = removed.identifier().normalized();
        self.implicit_indexes.retain(|implicit| *implicit != key);
        if self.primary_key_name.as_deref() == Some(key.as_str()) {
            self.primary_key_name = None;
        }
        Ok(self)
    }

    /// Renames an index, keeping its definition. Without a new name one is
    /// generated from the columns.
    pub fn rename_index(&mut self, old_name: &str, new_name: Option<&str>) -> Result<&mut Self> {
        let index = self.index(old_name)?.clone();
        let new_name = match new_name {
            Some(name) => name.to_string(),
            None => {
                let prefix = if index.is_unique() { "uniq" } else { "idx" };
                self.generated_name(&index.columns(), prefix)
            }
        };
        if index.identifier().matches(&new_name) {
            return Ok(self);
        }
        if self.has_index(&new_name) {
            return Err(DbalError::IndexAlreadyExists {
                index: new_name,
                table: self.name(),
            });
        }
        self.drop_index(old_name)?;
        self.insert_index(index.renamed(&new_name))?;
        Ok(self)
    }

    // ================================================================
    // Foreign keys
    // ================================================================

    fn foreign_key_position(&self, name: &str) -> Option<usize> {
        self.foreign_keys.iter().position(|fk| fk.is_named(name))
    }

    /// Adds a foreign key and an index over its local columns unless an
    /// existing index already covers them.
    pub fn add_foreign_key<S: AsRef<str>>(
        &mut self,
        foreign_table: &str,
        local_columns: &[S],
        foreign_columns: &[S],
        options: ForeignKeyOptions,
        name: Option<&str>,
    ) -> Result<&mut Self> {
        if let Some(missing) = local_columns.iter().find(|c| !self.has_column(c.as_ref())) {
            return Err(self.missing_column(missing.as_ref()));
        }
        let constraint = ForeignKeyConstraint::new(
            local_columns,
            foreign_table,
            foreign_columns,
            name,
            options,
        )?;
        self.insert_foreign_key(constraint)?;
        Ok(self)
    }

    fn insert_foreign_key(&mut self, mut constraint: ForeignKeyConstraint) -> Result<()> {
        let local_columns = constraint.local_columns();
        if constraint.identifier().is_none() {
            constraint.set_name(&self.generated_name(&local_columns, "fk"));
        }
        let name = constraint.name();
        match self.foreign_key_position(&name) {
            Some(position) => self.foreign_keys[position] = constraint,
            None => self.foreign_keys.push(constraint),
        }

        let index_name = self.generated_name(&local_columns, "idx");
        let candidate = Index::new(&index_name, &local_columns, false, false);
        if self
            .indexes
            .iter()
            .any(|existing| candidate.is_fulfilled_by(existing))
        {
            return Ok(());
        }
        let key = candidate.identifier().normalized();
        self.insert_index(candidate)?;
        self.implicit_indexes.push(key);
        Ok(())
    }

    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKeyConstraint] {
        &self.foreign_keys
    }

    #[must_use]
    pub fn has_foreign_key(&self, name: &str) -> bool {
        self.foreign_key_position(name).is_some()
    }

    pub fn foreign_key(&self, name: &str) -> Result<&ForeignKeyConstraint> {
        self.foreign_key_position(name)
            .map(|position| &self.foreign_keys[position])
            .ok_or_else(|| DbalError::ForeignKeyDoesNotExist {
                name: name.to_string(),
                table: self.name(),
            })
    }

    pub fn remove_foreign_key(&mut self, name: &str) -> Result<&mut Self> {
        let position =
            self.foreign_key_position(name)
                .ok_or_else(|| DbalError::ForeignKeyDoesNotExist {
                    name: name.to_string(),
                    table: self.name(),
                })?;
        self.foreign_keys.remove(position);
        Ok(self)
    }
}

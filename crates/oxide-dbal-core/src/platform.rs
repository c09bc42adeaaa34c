//! Platform (dialect) abstraction for DDL generation.
//!
//! Different databases quote, type and alter tables differently. The
//! [`Platform`] trait carries the generic SQL pieces as default methods;
//! a dialect implements the required methods and overrides whatever its
//! syntax differs in.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::{DbalError, Result};
use crate::identifier::Identifier;
use crate::schema::{Column, ForeignKeyConstraint, Index, Table};
use crate::table_diff::TableDiff;
use crate::types::{ColumnType, DefaultValue, TypeDeclaration, TypeSql};

/// Names made of these characters never need quoting on their own.
static BARE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_$]+$").unwrap_or_else(|_| unreachable!("static pattern"))
});

/// Whether `name` can be emitted without quotes (keywords aside).
#[must_use]
pub fn is_bare_identifier(name: &str) -> bool {
    name.is_empty() || (BARE_IDENTIFIER.is_match(name) && !name.chars().all(|c| c.is_ascii_digit()))
}

/// Feature flags of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Identity (auto increment) columns.
    pub identity_columns: bool,
    /// Identity columns are preferred over sequences.
    pub prefers_identity_columns: bool,
    /// Transaction savepoints.
    pub savepoints: bool,
    /// Per column collations.
    pub column_collation: bool,
    /// Comments declared inline with the column.
    pub inline_column_comments: bool,
    /// `COMMENT ON ...` statements.
    pub comment_on_statement: bool,
    /// Foreign key constraints (subject to the storage engine).
    pub foreign_keys: bool,
    /// Partial (filtered) indexes.
    pub partial_indexes: bool,
}

/// Which parts of a table `create_table_sql` emits besides the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateFlags {
    /// Indexes and the primary key.
    pub indexes: bool,
    /// Foreign key constraints.
    pub foreign_keys: bool,
}

impl CreateFlags {
    pub const ALL: Self = Self {
        indexes: true,
        foreign_keys: true,
    };
    pub const INDEXES: Self = Self {
        indexes: true,
        foreign_keys: false,
    };
    pub const FOREIGN_KEYS: Self = Self {
        indexes: false,
        foreign_keys: true,
    };
}

impl Default for CreateFlags {
    fn default() -> Self {
        Self::ALL
    }
}

/// Dialect specific DDL generation.
pub trait Platform {
    /// Returns the platform name.
    fn name(&self) -> &'static str;

    /// Character used to quote identifiers.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Whether `word` is reserved (case-insensitive).
    fn is_keyword(&self, word: &str) -> bool;

    /// Feature flags.
    fn capabilities(&self) -> Capabilities;

    /// Whether a single name part must be quoted.
    fn requires_quoting(&self, part: &str) -> bool {
        self.is_keyword(part) || !is_bare_identifier(part)
    }

    /// Quotes one name part, doubling embedded quote characters.
    fn quote_single_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    /// Quotes a (possibly dotted) name where needed. Idempotent.
    fn quote_identifier(&self, name: &str) -> String {
        Identifier::new(name).quoted_name(self)
    }

    /// Renders a string literal.
    fn quote_string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Renders a native type for `declaration`.
    fn render_type(&self, declaration: &TypeDeclaration) -> Result<TypeSql>;

    /// Whether columns of `column_type` may carry a default value.
    fn supports_default(&self, column_type: ColumnType) -> bool {
        let _ = column_type;
        true
    }

    fn current_timestamp_sql(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    fn current_date_sql(&self) -> &'static str {
        "CURRENT_DATE"
    }

    fn current_time_sql(&self) -> &'static str {
        "CURRENT_TIME"
    }

    /// The ` DEFAULT ...` part of a column declaration (with leading space).
    fn default_value_declaration(&self, column: &Column) -> String {
        let column_type = column.column_type();
        let default = column
            .default()
            .filter(|_| self.supports_default(column_type));
        let Some(default) = default else {
            return if column.not_null() {
                String::new()
            } else {
                String::from(" DEFAULT NULL")
            };
        };
        let text = default.literal_text();
        if matches!(default, DefaultValue::Expression(_)) || column_type.is_integer_mapped() {
            return format!(" DEFAULT {text}");
        }
        let current = match column_type {
            ColumnType::DateTime | ColumnType::DateTimeTz => Some(self.current_timestamp_sql()),
            ColumnType::Date => Some(self.current_date_sql()),
            ColumnType::Time => Some(self.current_time_sql()),
            _ => None,
        };
        if current == Some(text.as_str()) {
            return format!(" DEFAULT {text}");
        }
        if column_type == ColumnType::Boolean {
            return format!(" DEFAULT '{}'", default.boolean_text());
        }
        format!(" DEFAULT {}", self.quote_string_literal(&text))
    }

    /// Column level character set clause; empty when unsupported.
    fn column_charset_declaration(&self, charset: &str) -> String {
        let _ = charset;
        String::new()
    }

    /// Column level collation clause; empty when unsupported.
    fn column_collation_declaration(&self, collation: &str) -> String {
        if self.capabilities().column_collation {
            format!("COLLATE {collation}")
        } else {
            String::new()
        }
    }

    fn inline_column_comment(&self, comment: &str) -> String {
        format!("COMMENT {}", self.quote_string_literal(comment))
    }

    /// Full column declaration: quoted name, type and attributes.
    fn column_declaration(&self, column: &Column) -> Result<String> {
        let rendered = self.render_type(&column.type_declaration())?;
        if let Some(deprecation) = &rendered.deprecation {
            warn!(column = %column.name(), %deprecation, "deprecated column declaration");
        }
        let mut sql = format!("{} {}", column.quoted_name(self), rendered.sql);
        let options = column.platform_options();
        if let Some(charset) = options.charset.as_deref().filter(|c| !c.is_empty()) {
            let clause = self.column_charset_declaration(charset);
            if !clause.is_empty() {
                sql.push(' ');
                sql.push_str(&clause);
            }
        }
        sql.push_str(&self.default_value_declaration(column));
        if column.not_null() {
            sql.push_str(" NOT NULL");
        }
        if let Some(collation) = options.collation.as_deref().filter(|c| !c.is_empty()) {
            let clause = self.column_collation_declaration(collation);
            if !clause.is_empty() {
                sql.push(' ');
                sql.push_str(&clause);
            }
        }
        if let Some(comment) = column.comment() {
            if self.capabilities().inline_column_comments {
                sql.push(' ');
                sql.push_str(&self.inline_column_comment(comment));
            }
        }
        Ok(sql)
    }

    /// Comma separated quoted column list of an index.
    fn index_field_list(&self, index: &Index) -> String {
        index.quoted_columns(self).join(", ")
    }

    /// Keyword prefix of `CREATE ... INDEX` for `index` (with trailing space).
    fn create_index_flags(&self, index: &Index) -> &'static str {
        if index.is_unique() {
            "UNIQUE "
        } else {
            ""
        }
    }

    /// Index declaration used inside `CREATE TABLE`.
    fn index_declaration(&self, index: &Index) -> Result<String> {
        if index.columns().is_empty() {
            return Err(DbalError::IncompleteDefinition(index.name()));
        }
        Ok(format!(
            "{}INDEX {} ({})",
            self.create_index_flags(index),
            index.quoted_name(self),
            self.index_field_list(index)
        ))
    }

    /// Named unique constraint declaration used inside `CREATE TABLE`.
    fn unique_constraint_declaration(&self, name: &str, index: &Index) -> Result<String> {
        if index.columns().is_empty() {
            return Err(DbalError::IncompleteDefinition(name.to_string()));
        }
        Ok(format!(
            "CONSTRAINT {} UNIQUE ({})",
            self.quote_identifier(name),
            self.index_field_list(index)
        ))
    }

    /// Standalone statement creating `index` on `table`.
    fn create_index_sql(&self, index: &Index, table: &Identifier) -> Result<String> {
        if index.columns().is_empty() {
            return Err(DbalError::IncompleteDefinition(index.name()));
        }
        if index.is_primary() {
            return Ok(self.create_primary_key_sql(index, table));
        }
        Ok(format!(
            "CREATE {}INDEX {} ON {} ({})",
            self.create_index_flags(index),
            index.quoted_name(self),
            table.quoted_name(self),
            self.index_field_list(index)
        ))
    }

    fn create_primary_key_sql(&self, index: &Index, table: &Identifier) -> String {
        format!(
            "ALTER TABLE {} ADD PRIMARY KEY ({})",
            table.quoted_name(self),
            self.index_field_list(index)
        )
    }

    fn drop_index_sql(&self, index: &Identifier, table: &Identifier) -> String {
        let _ = table;
        format!("DROP INDEX {}", index.quoted_name(self))
    }

    fn drop_primary_key_sql(&self, table: &Identifier) -> String {
        format!("ALTER TABLE {} DROP PRIMARY KEY", table.quoted_name(self))
    }

    /// Extra clauses after `REFERENCES`: match kind and referential actions.
    fn advanced_foreign_key_options(&self, foreign_key: &ForeignKeyConstraint) -> String {
        let mut sql = String::new();
        let options = foreign_key.options();
        if let Some(action) = options.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = options.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        sql
    }

    /// `[CONSTRAINT name] FOREIGN KEY (...) REFERENCES t (...) ...`
    fn foreign_key_declaration(&self, foreign_key: &ForeignKeyConstraint) -> String {
        let mut sql = String::new();
        if let Some(name) = foreign_key.quoted_name(self) {
            sql.push_str("CONSTRAINT ");
            sql.push_str(&name);
            sql.push(' ');
        }
        sql.push_str("FOREIGN KEY (");
        sql.push_str(&foreign_key.quoted_local_columns(self).join(", "));
        sql.push_str(") REFERENCES ");
        sql.push_str(&foreign_key.quoted_foreign_table_name(self));
        sql.push_str(" (");
        sql.push_str(&foreign_key.quoted_foreign_columns(self).join(", "));
        sql.push(')');
        sql.push_str(&self.advanced_foreign_key_options(foreign_key));
        sql
    }

    fn create_foreign_key_sql(
        &self,
        foreign_key: &ForeignKeyConstraint,
        table: &Identifier,
    ) -> String {
        format!(
            "ALTER TABLE {} ADD {}",
            table.quoted_name(self),
            self.foreign_key_declaration(foreign_key)
        )
    }

    fn drop_foreign_key_sql(&self, name: &Identifier, table: &Identifier) -> String {
        self.drop_constraint_sql(name, table)
    }

    fn drop_constraint_sql(&self, name: &Identifier, table: &Identifier) -> String {
        format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            table.quoted_name(self),
            name.quoted_name(self)
        )
    }

    fn drop_table_sql(&self, table: &Identifier) -> String {
        format!("DROP TABLE {}", table.quoted_name(self))
    }

    fn truncate_table_sql(&self, table: &Identifier) -> String {
        format!("TRUNCATE {}", table.quoted_name(self))
    }

    fn comment_on_column_sql(
        &self,
        table: &Identifier,
        column: &Identifier,
        comment: &str,
    ) -> String {
        format!(
            "COMMENT ON COLUMN {}.{} IS {}",
            table.quoted_name(self),
            column.quoted_name(self),
            self.quote_string_literal(comment)
        )
    }

    /// Statements creating `table`.
    fn create_table_sql(&self, table: &Table, flags: CreateFlags) -> Result<Vec<String>>;

    /// Statements applying `diff`, in execution order.
    fn alter_table_sql(&self, diff: &TableDiff) -> Result<Vec<String>>;
}

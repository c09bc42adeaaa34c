//! The MySQL platform.

use tracing::{debug, warn};

use oxide_dbal_core::platform::{Capabilities, CreateFlags, Platform};
use oxide_dbal_core::schema::{ForeignKeyConstraint, Index, IndexFlag, Table, TableOptions};
use oxide_dbal_core::types::{ColumnType, TypeDeclaration, TypeSql};
use oxide_dbal_core::{DbalError, Identifier, Result, TableDiff};

use crate::alter;
use crate::config::MySqlConfig;
use crate::keywords::is_reserved_word;
use crate::types;

/// DDL generation for MySQL.
///
/// ```rust
/// use oxide_dbal_core::prelude::*;
/// use oxide_dbal_mysql::MySqlPlatform;
///
/// let mut table = Table::new("test");
/// table.add_column("id", ColumnType::Integer)?.set_autoincrement(true);
/// table.add_column("test", ColumnType::String)?.set_not_null(false);
/// table.set_primary_key(&["id"])?;
///
/// let sql = MySqlPlatform::new().create_table_sql(&table, CreateFlags::default())?;
/// assert_eq!(
///     sql,
///     vec![
///         "CREATE TABLE test (id INT AUTO_INCREMENT NOT NULL, test VARCHAR(255) DEFAULT NULL, \
///          PRIMARY KEY(id)) DEFAULT CHARACTER SET utf8 COLLATE utf8_unicode_ci ENGINE = InnoDB"
///     ]
/// );
/// # Ok::<(), oxide_dbal_core::DbalError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MySqlPlatform {
    config: MySqlConfig,
}

impl MySqlPlatform {
    /// Creates a platform with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a platform with `config`.
    #[must_use]
    pub const fn with_config(config: MySqlConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &MySqlConfig {
        &self.config
    }

    /// Storage engine of `table`, falling back to the configured default.
    #[must_use]
    pub fn engine_of(&self, table: Option<&Table>) -> String {
        table
            .and_then(|table| table.options().engine.clone())
            .unwrap_or_else(|| self.config.engine.clone())
    }

    /// Whether foreign keys of `table` are enforced by its engine.
    #[must_use]
    pub fn supports_foreign_keys_for(&self, table: Option<&Table>) -> bool {
        self.config
            .engine_supports_foreign_keys(&self.engine_of(table))
    }

    /// Table options clause following the column list of `CREATE TABLE`.
    #[must_use]
    pub fn table_options_sql(&self, options: &TableOptions) -> String {
        let charset = options
            .charset
            .clone()
            .unwrap_or_else(|| self.config.charset.clone());
        let collate = match (&options.collate, &options.charset) {
            (Some(collate), _) => collate.clone(),
            (None, Some(charset)) => format!("{charset}_unicode_ci"),
            (None, None) => self.config.default_collation(),
        };
        let engine = options
            .engine
            .clone()
            .unwrap_or_else(|| self.config.engine.clone());

        let mut parts = vec![
            format!("DEFAULT CHARACTER SET {charset}"),
            format!("COLLATE {collate}"),
            format!("ENGINE = {engine}"),
        ];
        if let Some(auto_increment) = options.auto_increment {
            parts.push(format!("AUTO_INCREMENT = {auto_increment}"));
        }
        if let Some(comment) = &options.comment {
            let comment = comment.trim_matches(|c: char| c == ' ' || c == '\'');
            parts.push(format!("COMMENT = {}", self.quote_string_literal(comment)));
        }
        if let Some(row_format) = &options.row_format {
            parts.push(format!("ROW_FORMAT = {row_format}"));
        }
        parts.join(" ")
    }
}

impl Platform for MySqlPlatform {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn is_keyword(&self, word: &str) -> bool {
        is_reserved_word(word)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            identity_columns: true,
            prefers_identity_columns: true,
            savepoints: true,
            column_collation: true,
            inline_column_comments: true,
            comment_on_statement: false,
            foreign_keys: true,
            partial_indexes: false,
        }
    }

    /// MySQL treats backslashes in string literals as escapes, so they are
    /// doubled before quotes are.
    fn quote_string_literal(&self, value: &str) -> String {
        let escaped = value.replace('\\', "\\\\").replace('\'', "''");
        format!("'{escaped}'")
    }

    fn render_type(&self, declaration: &TypeDeclaration) -> Result<TypeSql> {
        types::render_type(declaration)
    }

    fn supports_default(&self, column_type: ColumnType) -> bool {
        types::supports_default(column_type)
    }

    fn column_charset_declaration(&self, charset: &str) -> String {
        format!("CHARACTER SET {charset}")
    }

    fn create_index_flags(&self, index: &Index) -> &'static str {
        if index.is_unique() {
            "UNIQUE "
        } else if index.has_flag(IndexFlag::Fulltext) {
            "FULLTEXT "
        } else if index.has_flag(IndexFlag::Spatial) {
            "SPATIAL "
        } else {
            ""
        }
    }

    fn drop_index_sql(&self, index: &Identifier, table: &Identifier) -> String {
        format!(
            "DROP INDEX {} ON {}",
            index.quoted_name(self),
            table.quoted_name(self)
        )
    }

    fn advanced_foreign_key_options(&self, foreign_key: &ForeignKeyConstraint) -> String {
        let options = foreign_key.options();
        let mut sql = String::new();
        if let Some(match_kind) = options.match_kind {
            sql.push_str(" MATCH ");
            sql.push_str(match_kind.as_sql());
        }
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

    fn drop_foreign_key_sql(&self, name: &Identifier, table: &Identifier) -> String {
        format!(
            "ALTER TABLE {} DROP FOREIGN KEY {}",
            table.quoted_name(self),
            name.quoted_name(self)
        )
    }

    fn create_table_sql(&self, table: &Table, flags: CreateFlags) -> Result<Vec<String>> {
        if table.columns().is_empty() {
            return Err(DbalError::NoColumnsSpecified(table.name()));
        }
        let table_name = table.quoted_name(self);

        let mut fields = table
            .columns()
            .iter()
            .map(|column| self.column_declaration(column))
            .collect::<Result<Vec<_>>>()?;
        if flags.indexes {
            for index in table.indexes().iter().filter(|index| !index.is_primary()) {
                fields.push(self.index_declaration(index)?);
            }
            if let Some(primary) = table.primary_key() {
                fields.push(format!("PRIMARY KEY({})", self.index_field_list(primary)));
            }
        }

        let options = table.options();
        let temporary = if options.temporary { "TEMPORARY " } else { "" };
        let mut statements = vec![format!(
            "CREATE {temporary}TABLE {table_name} ({}) {}",
            fields.join(", "),
            self.table_options_sql(options)
        )];

        if flags.foreign_keys && !table.foreign_keys().is_empty() {
            if self.supports_foreign_keys_for(Some(table)) {
                statements.extend(table.foreign_keys().iter().map(|foreign_key| {
                    self.create_foreign_key_sql(foreign_key, table.identifier())
                }));
            } else {
                warn!(
                    table = %table.name(),
                    engine = %self.engine_of(Some(table)),
                    "engine does not support foreign keys, constraints not created"
                );
            }
        }

        debug!(table = %table.name(), statements = statements.len(), "generated CREATE TABLE");
        Ok(statements)
    }

    fn alter_table_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        alter::alter_table_sql(self, diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_dbal_core::schema::ForeignKeyOptions;
    use oxide_dbal_core::types::DefaultValue;

    #[test]
    fn test_quote_identifiers() {
        let platform = MySqlPlatform::new();
        assert_eq!(platform.quote_identifier("foo"), "foo");
        assert_eq!(platform.quote_identifier("Foo"), "Foo");
        assert_eq!(platform.quote_identifier("select"), "`select`");
        assert_eq!(platform.quote_identifier("`foo`"), "`foo`");
        assert_eq!(platform.quote_identifier("foo-bar"), "`foo-bar`");
        assert_eq!(platform.quote_identifier("a`b"), "`a``b`");
        assert_eq!(
            platform.quote_identifier("schema.table"),
            "`schema`.`table`"
        );
        assert_eq!(
            platform.quote_identifier("myschema.table"),
            "myschema.`table`"
        );
        assert_eq!(
            platform.quote_identifier("myschema.users"),
            "myschema.users"
        );
        assert_eq!(platform.quote_single_identifier("foo"), "`foo`");
    }

    #[test]
    fn test_quote_string_literal_escapes_backslashes() {
        let platform = MySqlPlatform::new();
        assert_eq!(platform.quote_string_literal("Foo'Bar\\"), "'Foo''Bar\\\\'");
    }

    #[test]
    fn test_capabilities() {
        let capabilities = MySqlPlatform::new().capabilities();
        assert!(capabilities.identity_columns);
        assert!(capabilities.prefers_identity_columns);
        assert!(capabilities.savepoints);
        assert!(capabilities.column_collation);
        assert!(capabilities.inline_column_comments);
        assert!(!capabilities.comment_on_statement);
        assert!(!capabilities.partial_indexes);
    }

    #[test]
    fn test_column_collation_declaration() {
        let platform = MySqlPlatform::new();
        assert_eq!(
            platform.column_collation_declaration("ascii_general_ci"),
            "COLLATE ascii_general_ci"
        );
    }

    #[test]
    fn test_column_declaration_with_charset_and_comment() {
        let platform = MySqlPlatform::new();
        let mut column = oxide_dbal_core::Column::new("name", ColumnType::String);
        column
            .set_charset(Some("latin1"))
            .set_default(Some(DefaultValue::from("it's")))
            .set_comment(Some("a name"));
        assert_eq!(
            platform.column_declaration(&column).unwrap(),
            "name VARCHAR(255) CHARACTER SET latin1 DEFAULT 'it''s' NOT NULL COMMENT 'a name'"
        );
    }

    #[test]
    fn test_table_options() {
        let platform = MySqlPlatform::new();
        let options = TableOptions {
            engine: Some(String::from("MyISAM")),
            charset: Some(String::from("latin1")),
            auto_increment: Some(100),
            comment: Some(String::from("Archive")),
            row_format: Some(String::from("DYNAMIC")),
            ..TableOptions::default()
        };
        assert_eq!(
            platform.table_options_sql(&options),
            "DEFAULT CHARACTER SET latin1 COLLATE latin1_unicode_ci ENGINE = MyISAM \
             AUTO_INCREMENT = 100 COMMENT = 'Archive' ROW_FORMAT = DYNAMIC"
        );
    }

    #[test]
    fn test_configured_defaults() {
        let platform = MySqlPlatform::with_config(MySqlConfig {
            charset: String::from("utf8mb4"),
            collation: Some(String::from("utf8mb4_bin")),
            engine: String::from("Aria"),
            ..MySqlConfig::default()
        });
        assert_eq!(
            platform.table_options_sql(&TableOptions::default()),
            "DEFAULT CHARACTER SET utf8mb4 COLLATE utf8mb4_bin ENGINE = Aria"
        );
        assert!(!platform.supports_foreign_keys_for(None));
    }

    #[test]
    fn test_create_table_requires_columns() {
        let err = MySqlPlatform::new()
            .create_table_sql(&Table::new("empty"), CreateFlags::ALL)
            .unwrap_err();
        assert!(matches!(err, DbalError::NoColumnsSpecified(name) if name == "empty"));
    }

    #[test]
    fn test_foreign_key_declaration_with_options() {
        let platform = MySqlPlatform::new();
        let foreign_key = ForeignKeyConstraint::new(
            &["office_id"],
            "offices",
            &["id"],
            Some("fk_office"),
            ForeignKeyOptions::default()
                .on_delete(oxide_dbal_core::ForeignKeyAction::Restrict)
                .on_update(oxide_dbal_core::ForeignKeyAction::Cascade),
        )
        .unwrap();
        assert_eq!(
            platform.foreign_key_declaration(&foreign_key),
            "CONSTRAINT fk_office FOREIGN KEY (office_id) REFERENCES offices (id) \
             ON UPDATE CASCADE ON DELETE RESTRICT"
        );
    }
}

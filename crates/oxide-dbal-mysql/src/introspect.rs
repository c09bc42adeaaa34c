//! Queries reading schema metadata from `information_schema`.
//!
//! Table and database names are embedded as string literals. When no
//! database is given, the connection's current database (`DATABASE()`) is
//! used.

use oxide_dbal_core::platform::Platform;

use crate::platform::MySqlPlatform;

impl MySqlPlatform {
    fn database_literal(&self, database: Option<&str>) -> String {
        database.map_or_else(
            || String::from("DATABASE()"),
            |database| self.quote_string_literal(database),
        )
    }

    /// Columns of `table`, one row per column.
    #[must_use]
    pub fn list_table_columns_sql(&self, table: &str, database: Option<&str>) -> String {
        format!(
            "SELECT COLUMN_NAME AS Field, COLUMN_TYPE AS Type, IS_NULLABLE AS `Null`, \
             COLUMN_KEY AS `Key`, COLUMN_DEFAULT AS `Default`, EXTRA AS Extra, \
             COLUMN_COMMENT AS Comment, CHARACTER_SET_NAME AS CharacterSet, \
             COLLATION_NAME AS Collation \
             FROM information_schema.COLUMNS \
             WHERE TABLE_SCHEMA = {} AND TABLE_NAME = {}",
            self.database_literal(database),
            self.quote_string_literal(table)
        )
    }

    /// Index columns of `table`, in index order.
    ///
    /// Without a database this is `SHOW INDEX FROM`, which takes the table
    /// as given.
    #[must_use]
    pub fn list_table_indexes_sql(&self, table: &str, database: Option<&str>) -> String {
        let Some(database) = database else {
            return format!("SHOW INDEX FROM {table}");
        };
        format!(
            "SELECT NON_UNIQUE AS Non_Unique, INDEX_NAME AS Key_name, \
             COLUMN_NAME AS Column_Name, SUB_PART AS Sub_Part, INDEX_TYPE AS Index_Type \
             FROM information_schema.STATISTICS \
             WHERE TABLE_NAME = {} AND TABLE_SCHEMA = {} ORDER BY SEQ_IN_INDEX ASC",
            self.quote_string_literal(table),
            self.quote_string_literal(database)
        )
    }

    /// Foreign key columns of `table` with their referential actions.
    ///
    /// The referential constraint join is wrapped in version comments so
    /// that servers older than 5.1.16 still run the query.
    #[must_use]
    pub fn list_table_foreign_keys_sql(&self, table: &str, database: Option<&str>) -> String {
        let table = self.quote_string_literal(table);
        let database = self.database_literal(database);
        format!(
            "SELECT DISTINCT k.`CONSTRAINT_NAME`, k.`COLUMN_NAME`, k.`REFERENCED_TABLE_NAME`, \
             k.`REFERENCED_COLUMN_NAME` /*!50116 , c.update_rule, c.delete_rule */ \
             FROM information_schema.key_column_usage k /*!50116 \
             INNER JOIN information_schema.referential_constraints c ON \
             \x20 c.constraint_name = k.constraint_name AND \
             \x20 c.table_name = {table} */ \
             WHERE k.table_name = {table} AND k.table_schema = {database} \
             /*!50116 AND c.constraint_schema = {database} */ \
             AND k.`REFERENCED_COLUMN_NAME` is not NULL"
        )
    }

    /// Views of `database`.
    #[must_use]
    pub fn list_views_sql(&self, database: &str) -> String {
        format!(
            "SELECT * FROM information_schema.VIEWS WHERE TABLE_SCHEMA = {}",
            self.quote_string_literal(database)
        )
    }

    /// Constraints of `table` as reported by the server.
    #[must_use]
    pub fn list_table_constraints_sql(&self, table: &str) -> String {
        format!("SHOW INDEX FROM {table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "Foo'Bar\\";
    const QUOTED: &str = "'Foo''Bar\\\\'";

    #[test]
    fn test_indexes_sql() {
        let platform = MySqlPlatform::new();
        assert_eq!(
            platform.list_table_indexes_sql("foo", None),
            "SHOW INDEX FROM foo"
        );
        let sql = platform.list_table_indexes_sql(NAME, Some("db"));
        assert!(sql.contains(QUOTED), "{sql}");
        assert!(sql.contains("TABLE_SCHEMA = 'db'"), "{sql}");
        assert!(platform
            .list_table_indexes_sql("foo", Some(NAME))
            .contains(QUOTED));
    }

    #[test]
    fn test_columns_sql() {
        let platform = MySqlPlatform::new();
        let sql = platform.list_table_columns_sql(NAME, None);
        assert!(sql.contains(QUOTED));
        assert!(sql.contains("TABLE_SCHEMA = DATABASE()"));
        assert!(platform
            .list_table_columns_sql("foo", Some(NAME))
            .contains(QUOTED));
    }

    #[test]
    fn test_foreign_keys_sql() {
        let platform = MySqlPlatform::new();
        let sql = platform.list_table_foreign_keys_sql("foo", None);
        assert!(sql.contains("DATABASE()"));
        assert!(sql.contains("k.table_name = 'foo'"));

        let sql = platform.list_table_foreign_keys_sql("foo", Some("bar"));
        assert!(sql.contains("bar"));
        assert!(!sql.contains("DATABASE()"));

        assert!(platform
            .list_table_foreign_keys_sql(NAME, None)
            .contains(QUOTED));
        assert!(platform
            .list_table_foreign_keys_sql("foo", Some(NAME))
            .contains(QUOTED));
    }

    #[test]
    fn test_views_sql() {
        let platform = MySqlPlatform::new();
        assert_eq!(
            platform.list_views_sql(NAME),
            format!("SELECT * FROM information_schema.VIEWS WHERE TABLE_SCHEMA = {QUOTED}")
        );
    }
}

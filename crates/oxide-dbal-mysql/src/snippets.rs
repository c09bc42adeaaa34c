//! Standalone SQL fragments and statements that do not depend on a schema
//! object.

use oxide_dbal_core::platform::Platform;

use crate::platform::MySqlPlatform;
use crate::types;

/// Row count used for `LIMIT` when a query only has an offset.
pub const MAX_LIMIT: u64 = u64::MAX;

impl MySqlPlatform {
    /// Regular expression match operator.
    #[must_use]
    pub const fn regexp_operator(&self) -> &'static str {
        "RLIKE"
    }

    /// `CONCAT(a, b, ...)`.
    #[must_use]
    pub fn concat_expression<S: AsRef<str>>(&self, parts: &[S]) -> String {
        let parts: Vec<&str> = parts.iter().map(AsRef::as_ref).collect();
        format!("CONCAT({})", parts.join(", "))
    }

    /// Appends `LIMIT`/`OFFSET` to `query`.
    ///
    /// MySQL has no offset without limit, so an offset alone is paired with
    /// the largest possible row count. A zero offset is omitted.
    ///
    /// ```rust
    /// use oxide_dbal_mysql::MySqlPlatform;
    ///
    /// let platform = MySqlPlatform::new();
    /// assert_eq!(
    ///     platform.modify_limit_query("SELECT n FROM Foo", None, Some(10)),
    ///     "SELECT n FROM Foo LIMIT 18446744073709551615 OFFSET 10"
    /// );
    /// ```
    #[must_use]
    pub fn modify_limit_query(
        &self,
        query: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> String {
        let offset = offset.filter(|&offset| offset > 0);
        let mut sql = String::from(query);
        match (limit, offset) {
            (Some(limit), _) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(_)) => sql.push_str(&format!(" LIMIT {MAX_LIMIT}")),
            (None, None) => {}
        }
        if let Some(offset) = offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        sql
    }

    /// `DATETIME`, or `TIMESTAMP` for row version columns.
    #[must_use]
    pub const fn date_time_type_declaration(&self, version: bool) -> &'static str {
        types::date_time(version)
    }

    #[must_use]
    pub const fn list_databases_sql(&self) -> &'static str {
        "SHOW DATABASES"
    }

    #[must_use]
    pub fn create_database_sql(&self, name: &str) -> String {
        format!("CREATE DATABASE {}", self.quote_identifier(name))
    }

    #[must_use]
    pub fn drop_database_sql(&self, name: &str) -> String {
        format!("DROP DATABASE {}", self.quote_identifier(name))
    }

    /// Base tables of the current database.
    #[must_use]
    pub const fn list_tables_sql(&self) -> &'static str {
        "SHOW FULL TABLES WHERE Table_type = 'BASE TABLE'"
    }
}

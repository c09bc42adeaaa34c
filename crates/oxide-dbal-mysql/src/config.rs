//! Platform configuration.

use serde::{Deserialize, Serialize};

use oxide_dbal_core::naming::DEFAULT_MAX_IDENTIFIER_LENGTH;

/// Settings of a [`MySqlPlatform`](crate::MySqlPlatform).
///
/// Every field has a default, so a partial JSON document is a valid
/// configuration:
///
/// ```rust
/// use oxide_dbal_mysql::MySqlConfig;
///
/// let config: MySqlConfig = serde_json::from_str(r#"{"charset": "utf8mb4"}"#).unwrap();
/// assert_eq!(config.charset, "utf8mb4");
/// assert_eq!(config.default_collation(), "utf8mb4_unicode_ci");
/// assert_eq!(config.engine, "InnoDB");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MySqlConfig {
    /// Table character set used when a table does not set one.
    pub charset: String,
    /// Table collation used when a table does not set one. Derived from
    /// the character set when absent.
    pub collation: Option<String>,
    /// Storage engine used when a table does not set one.
    pub engine: String,
    /// Storage engines that enforce foreign keys (case-insensitive).
    pub foreign_key_engines: Vec<String>,
    /// Length limit of generated index and constraint names.
    pub max_identifier_length: usize,
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            charset: String::from("utf8"),
            collation: None,
            engine: String::from("InnoDB"),
            foreign_key_engines: vec![String::from("InnoDB")],
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
        }
    }
}

impl MySqlConfig {
    /// Collation for tables declaring neither charset nor collation.
    #[must_use]
    pub fn default_collation(&self) -> String {
        self.collation
            .clone()
            .unwrap_or_else(|| format!("{}_unicode_ci", self.charset))
    }

    /// Whether `engine` enforces foreign keys.
    #[must_use]
    pub fn engine_supports_foreign_keys(&self, engine: &str) -> bool {
        let engine = engine.trim();
        self.foreign_key_engines
            .iter()
            .any(|supported| supported.trim().eq_ignore_ascii_case(engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MySqlConfig::default();
        assert_eq!(config.charset, "utf8");
        assert_eq!(config.default_collation(), "utf8_unicode_ci");
        assert_eq!(config.engine, "InnoDB");
        assert_eq!(config.max_identifier_length, 63);
    }

    #[test]
    fn test_engine_check_is_case_insensitive() {
        let config = MySqlConfig::default();
        assert!(config.engine_supports_foreign_keys("innodb"));
        assert!(config.engine_supports_foreign_keys(" InnoDB "));
        assert!(!config.engine_supports_foreign_keys("MyISAM"));
    }

    #[test]
    fn test_partial_json() {
        let config: MySqlConfig = serde_json::from_str(
            r#"{"foreign_key_engines": ["InnoDB", "NDB"], "collation": "utf8_bin"}"#,
        )
        .unwrap();
        assert!(config.engine_supports_foreign_keys("ndb"));
        assert_eq!(config.default_collation(), "utf8_bin");
        assert_eq!(config.charset, "utf8");
    }
}

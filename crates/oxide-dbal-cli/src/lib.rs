//! Library side of the `oxide-dbal` command line tool.
//!
//! Loads JSON table definitions and platform configuration, and turns them
//! into MySQL statements:
//!
//! ```bash
//! # CREATE TABLE statements for a definition
//! oxide-dbal create --table users.json
//!
//! # ALTER statements turning one definition into another
//! oxide-dbal diff --from users_v1.json --to users_v2.json
//!
//! # Same, as a JSON array, with a custom configuration
//! oxide-dbal --config mysql.json --json diff --from v1.json --to v2.json
//! ```

pub mod definition;
pub mod error;

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use oxide_dbal_core::{diff_table, CreateFlags, Identifier, Platform, Table};
use oxide_dbal_mysql::{MySqlConfig, MySqlPlatform};

pub use definition::TableDefinition;
pub use error::{CliError, Result};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the platform configuration, or the defaults without a file.
pub fn load_config(path: Option<&Path>) -> Result<MySqlConfig> {
    let Some(path) = path else {
        return Ok(MySqlConfig::default());
    };
    let config = read_json(path)?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Loads a table definition file into a table.
pub fn load_table(path: &Path, config: &MySqlConfig) -> Result<Table> {
    let definition: TableDefinition = read_json(path)?;
    definition.to_table(config.max_identifier_length)
}

/// `CREATE TABLE` and foreign key statements for `table`.
pub fn create_statements(platform: &MySqlPlatform, table: &Table) -> Result<Vec<String>> {
    Ok(platform.create_table_sql(table, CreateFlags::ALL)?)
}

/// Statements altering `from` into `to`.
pub fn diff_statements(platform: &MySqlPlatform, from: &Table, to: &Table) -> Result<Vec<String>> {
    let diff = diff_table(from, to);
    if diff.is_empty() {
        debug!(table = %from.name(), "tables are identical");
    }
    Ok(platform.alter_table_sql(&diff)?)
}

/// `DROP TABLE` statement for the table called `name`.
#[must_use]
pub fn drop_statement(platform: &MySqlPlatform, name: &str) -> String {
    platform.drop_table_sql(&Identifier::new(name))
}

/// Renders statements one per line, each terminated with `;`, or as a
/// JSON array.
pub fn format_statements(statements: &[String], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(statements)?);
    }
    Ok(statements
        .iter()
        .map(|statement| format!("{statement};"))
        .collect::<Vec<_>>()
        .join("\n"))
}

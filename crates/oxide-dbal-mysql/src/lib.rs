//! # oxide-dbal-mysql
//!
//! MySQL dialect for [`oxide_dbal_core`].
//!
//! [`MySqlPlatform`] implements [`Platform`](oxide_dbal_core::Platform):
//! - `CREATE TABLE` statements with inline indexes, table options and
//!   foreign keys added afterwards when the storage engine supports them
//! - `ALTER TABLE` compilation of a [`TableDiff`](oxide_dbal_core::TableDiff)
//!   into an ordered statement list
//! - Type declarations with MySQL's text and blob tiers
//!
//! It also provides standalone statements (databases, limit rewriting),
//! `information_schema` queries and the native type mapping.
//!
//! ## Example
//!
//! ```rust
//! use oxide_dbal_core::prelude::*;
//! use oxide_dbal_mysql::MySqlPlatform;
//!
//! let mut table = Table::new("test");
//! table.add_column("id", ColumnType::Integer)?.set_autoincrement(true);
//! table.add_column("test", ColumnType::String)?.set_not_null(false);
//! table.set_primary_key(&["id"])?;
//!
//! let platform = MySqlPlatform::new();
//! assert_eq!(
//!     platform.create_table_sql(&table, CreateFlags::ALL)?,
//!     vec![
//!         "CREATE TABLE test (id INT AUTO_INCREMENT NOT NULL, test VARCHAR(255) DEFAULT NULL, \
//!          PRIMARY KEY(id)) DEFAULT CHARACTER SET utf8 COLLATE utf8_unicode_ci ENGINE = InnoDB"
//!     ]
//! );
//! # Ok::<(), oxide_dbal_core::DbalError>(())
//! ```

mod alter;
pub mod config;
pub mod introspect;
pub mod keywords;
pub mod platform;
pub mod snippets;
pub mod type_mapping;
pub mod types;

pub use config::MySqlConfig;
pub use platform::MySqlPlatform;

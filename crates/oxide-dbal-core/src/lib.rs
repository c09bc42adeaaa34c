//! # oxide-dbal-core
//!
//! Dialect independent schema model and schema diffing.
//!
//! This crate provides:
//! - An in-memory schema model: [`Table`], [`Column`], [`Index`] and
//!   [`ForeignKeyConstraint`], addressed by quoting aware [`Identifier`]s
//! - A [`TableDiff`] describing the changes between two versions of a table,
//!   computed by the [`Comparator`]
//! - The [`Platform`] trait that dialects implement to turn tables and
//!   diffs into DDL statements
//!
//! ## Example
//!
//! ```rust
//! use oxide_dbal_core::prelude::*;
//!
//! let mut from = Table::new("users");
//! from.add_column("id", ColumnType::Integer)?;
//! from.set_primary_key(&["id"])?;
//!
//! let mut to = from.clone();
//! to.add_column("email", ColumnType::String)?.set_length(Some(180));
//! to.add_unique_index(&["email"], None)?;
//!
//! let diff = Comparator::new().diff_table(&from, &to);
//! assert_eq!(diff.added_columns.len(), 1);
//! assert_eq!(diff.added_indexes.len(), 1);
//! # Ok::<(), oxide_dbal_core::DbalError>(())
//! ```

pub mod comparator;
pub mod error;
pub mod identifier;
pub mod naming;
pub mod platform;
pub mod schema;
pub mod table_diff;
pub mod types;

pub use comparator::{diff_table, Comparator};
pub use error::{DbalError, Result};
pub use identifier::Identifier;
pub use platform::{Capabilities, CreateFlags, Platform};
pub use schema::{
    Column, ForeignKeyAction, ForeignKeyConstraint, ForeignKeyMatch, ForeignKeyOptions, Index,
    IndexFlag, PlatformOptions, Table, TableOptions,
};
pub use table_diff::{ChangedProperty, ColumnDiff, TableDiff};
pub use types::{ColumnType, DefaultValue, TypeDeclaration, TypeSql};

/// Commonly used items.
pub mod prelude {
    pub use crate::comparator::Comparator;
    pub use crate::error::{DbalError, Result};
    pub use crate::identifier::Identifier;
    pub use crate::platform::{CreateFlags, Platform};
    pub use crate::schema::{
        Column, ForeignKeyAction, ForeignKeyConstraint, ForeignKeyOptions, Index, IndexFlag, Table,
        TableOptions,
    };
    pub use crate::table_diff::{ColumnDiff, TableDiff};
    pub use crate::types::{ColumnType, DefaultValue};
}

//! Schema assets: tables, columns, indexes and foreign keys.

mod column;
mod foreign_key;
mod index;
mod table;

pub use column::{Column, PlatformOptions};
pub use foreign_key::{ForeignKeyAction, ForeignKeyConstraint, ForeignKeyMatch, ForeignKeyOptions};
pub use index::{Index, IndexFlag};
pub use table::{Table, TableOptions, PRIMARY_KEY_NAME};

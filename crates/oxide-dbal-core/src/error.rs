//! Error types for schema construction and DDL generation.

use thiserror::Error;

/// Errors that can occur while building schemas or rendering DDL.
#[derive(Debug, Error)]
pub enum DbalError {
    /// A type name could not be resolved to a logical column type.
    #[error("Unknown column type '{0}' requested")]
    UnknownColumnType(String),

    /// A column referenced by an index, key or lookup does not exist.
    #[error("There is no column with name '{column}' on table '{table}'")]
    ColumnDoesNotExist {
        /// Column name as requested.
        column: String,
        /// Table name.
        table: String,
    },

    /// A column with the same name is already part of the table.
    #[error("The column '{column}' on table '{table}' already exists")]
    ColumnAlreadyExists {
        /// Column name.
        column: String,
        /// Table name.
        table: String,
    },

    /// An index with the given name does not exist.
    #[error("Index '{index}' does not exist on table '{table}'")]
    IndexDoesNotExist {
        /// Index name.
        index: String,
        /// Table name.
        table: String,
    },

    /// An index with the same name (or a second primary key) already exists.
    #[error("An index with name '{index}' was already defined on table '{table}'")]
    IndexAlreadyExists {
        /// Index name.
        index: String,
        /// Table name.
        table: String,
    },

    /// A foreign key with the given name does not exist.
    #[error("There exists no foreign key with the name '{name}' on table '{table}'")]
    ForeignKeyDoesNotExist {
        /// Constraint name.
        name: String,
        /// Table name.
        table: String,
    },

    /// Index or constraint declared without columns.
    #[error("Incomplete definition: '{0}' requires at least one column")]
    IncompleteDefinition(String),

    /// Local and referenced column lists of a foreign key differ in length.
    #[error("Foreign key has {local} local column(s) but {foreign} referenced column(s)")]
    ForeignKeyColumnMismatch {
        /// Number of local columns.
        local: usize,
        /// Number of referenced columns.
        foreign: usize,
    },

    /// A table must have at least one column to be created.
    #[error("No columns specified for table '{0}'")]
    NoColumnsSpecified(String),

    /// Type options that cannot be rendered for the target platform.
    #[error("Invalid options for type '{type_name}': {reason}")]
    InvalidTypeOptions {
        /// Logical type being rendered.
        type_name: String,
        /// What is wrong with them.
        reason: String,
    },
}

/// Result type for schema and DDL operations.
pub type Result<T> = std::result::Result<T, DbalError>;

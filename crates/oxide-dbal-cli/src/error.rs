//! Error types for the command line tool.

use std::path::PathBuf;

use oxide_dbal_core::DbalError;

/// Errors raised while loading inputs or generating statements.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A file is not valid JSON for the expected document.
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The definition describes an invalid table, or the table cannot be
    /// rendered.
    #[error(transparent)]
    Schema(#[from] DbalError),

    /// Statements could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for command line operations.
pub type Result<T> = std::result::Result<T, CliError>;

//! Error types and error handling

use std::path::PathBuf;

use thiserror::Error;

/// Library error type
///
/// Form generation itself never fails: unmapped columns and unknown filter
/// names are skipped. Errors come from loading schemas and configuration,
/// and from addressing fields that a form does not have.
#[derive(Debug, Error)]
pub enum TableFormError {
    /// Schema file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Schema source is not valid
    #[error("Invalid schema: {0}")]
    Schema(#[from] toml::de::Error),

    /// A table declares the same column twice
    #[error("Duplicate column `{column}` in table `{table}`")]
    DuplicateColumn {
        /// Table class name
        table: String,
        /// Repeated column name
        column: String,
    },

    /// No table with the requested name
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// No field with the requested name
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Choices were assigned to a field that is not a select field
    #[error("Field `{0}` is not a select field")]
    NotASelectField(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

/// Result alias using [`TableFormError`]
pub type Result<T, E = TableFormError> = std::result::Result<T, E>;

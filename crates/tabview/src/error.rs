//! Error types for the tabview library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabview operations.
#[derive(Debug, Error)]
pub enum TabviewError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed input or an encoding mismatch.
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Parser output did not have the expected shape (e.g. no schema).
    #[error("Processing error: {0}")]
    Processing(String),

    /// The schema handed to ingest names the same field twice.
    #[error("Duplicate field in schema: '{0}'")]
    DuplicateField(String),

    /// An operation named a field that is not part of the schema.
    #[error("Unknown field: '{0}'")]
    UnknownField(String),

    /// A column position outside `[0, len)`.
    #[error("Index {index} out of range for {len} columns")]
    IndexOutOfRange { index: usize, len: usize },

    /// Preference store unavailable or holding unreadable data.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// An operation that needs a dataset ran before one was loaded.
    #[error("No dataset loaded")]
    NoDataset,

    /// Nothing to export or display.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Export serialization failed.
    #[error("Export error: {0}")]
    Export(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tabview operations.
pub type Result<T> = std::result::Result<T, TabviewError>;

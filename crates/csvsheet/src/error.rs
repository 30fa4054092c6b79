//! Error types for the csvsheet library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for import operations.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes could not be decoded with the configured encoding.
    #[error("Could not decode '{path}' as {encoding}")]
    Decode { path: PathBuf, encoding: String },

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The table sink rejected a write.
    #[error("Sink error: {0}")]
    Sink(String),
}

impl ImportError {
    /// Build an [`ImportError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ImportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;

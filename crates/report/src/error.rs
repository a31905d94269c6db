//! Error types for report rendering and output.

use hmatch_core::DatasetError;
use thiserror::Error;

/// Errors raised while reading datasets or writing report files.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset failed validation
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl ReportError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

//! Error types for persistence stores

use std::path::PathBuf;

/// Errors raised by a [`KeyValueStore`](crate::KeyValueStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error reading or writing the backing file
    #[error("io error on {path}: {source}")]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Backing file exists but is not a JSON object of strings
    #[error("store file {path} is corrupt: {message}")]
    Corrupt {
        /// Backing file
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// Could not encode the store contents
    #[error("failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create corrupt-file error for path
    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

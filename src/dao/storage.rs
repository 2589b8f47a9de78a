use std::{error::Error, path::PathBuf};
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be written.
    #[error("failed to write `{}`: {message}", .path.display())]
    Write {
        /// File or resource being written.
        path: PathBuf,
        /// What was being attempted.
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct a write error from any backend failure.
    pub fn write(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        StorageError::Write {
            path: path.into(),
            message: message.into(),
            source: Box::new(source),
        }
    }
}

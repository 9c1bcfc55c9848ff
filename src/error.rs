//! Error types for pipestore
//!
//! Centralized error handling using thiserror.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur in a record store operation
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be opened, read, or written
    #[error("IO error during {op} on {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The advisory lock beside the store file could not be taken
    #[error("Lock error on {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line in the store file is not valid UTF-8
    #[error("Line {line} of {} is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf, line: usize },
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// True when the store file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

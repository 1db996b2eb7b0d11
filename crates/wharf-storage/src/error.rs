//! Error types for wharf-storage

use thiserror::Error;

/// Result type alias for wharf-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wharf-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No value is stored under the requested key
    #[error("Key not found: {key}")]
    NotFound {
        /// The key that was requested
        key: String,
    },

    /// I/O failure in the storage backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure
    #[error("Storage backend error: {message}")]
    Backend {
        /// What the backend reported
        message: String,
    },
}

impl Error {
    /// Creates a not-found error for `key`.
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }

    /// Creates a backend error with a message.
    pub fn backend(message: impl Into<String>) -> Self {
        Error::Backend {
            message: message.into(),
        }
    }

    /// Returns whether this error means the key simply was not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

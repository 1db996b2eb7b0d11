//! Error types for wharf-acl

use thiserror::Error;

/// Result type alias for wharf-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wharf-acl
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No configuration document exists for the named repository
    #[error("Repository not found: {name}")]
    RepositoryNotFound {
        /// The repository name that was requested
        name: String,
    },

    /// The stored configuration document could not be read or validated
    #[error("Config error: {0}")]
    Config(#[from] wharf_config::Error),

    /// Failure in the underlying blob store
    #[error("Storage error: {0}")]
    Storage(#[from] wharf_storage::Error),
}

impl Error {
    /// Creates a not-found error for the repository `name`.
    pub fn repository_not_found(name: impl Into<String>) -> Self {
        Error::RepositoryNotFound { name: name.into() }
    }
}

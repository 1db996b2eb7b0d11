//! Error types for wharf-config

use thiserror::Error;

/// Result type alias for wharf-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wharf-config
///
/// A configuration document that cannot be read is always an error, never a
/// default: treating a corrupted policy document as "no policy" would fail
/// open.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The document is structurally invalid or missing a required field
    #[error("Malformed repository config: {message}")]
    Malformed {
        /// What is wrong with the document
        message: String,
    },

    /// A storage alias reference has no entry in the alias table
    #[error("Unresolved storage alias: {alias}")]
    UnresolvedAlias {
        /// The alias name that was referenced
        alias: String,
    },

    /// The document is not valid YAML at all
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Creates a malformed-config error with a message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::Malformed {
            message: message.into(),
        }
    }

    /// Creates an unresolved-alias error for `alias`.
    pub fn unresolved_alias(alias: impl Into<String>) -> Self {
        Error::UnresolvedAlias {
            alias: alias.into(),
        }
    }
}

//! # wharf-config
//!
//! Repository configuration for the Wharf artifact repository.
//!
//! Each hosted repository is described by one YAML document persisted in the
//! blob store under `<name>.yaml`:
//!
//! ```yaml
//! repo:
//!   type: maven
//!   storage: default          # alias, or an inline definition
//!   port: 8081
//!   content-length-max: 4096
//!   permissions:
//!     jane: [download, deploy]
//!     /readers: [download]
//!     "*": [download]
//!   permissions_include_patterns:
//!     - "**"
//! ```
//!
//! This crate provides:
//!
//! - [`StorageAliases`]: the shared table resolving storage aliases to
//!   concrete definitions
//! - [`RepoConfig`]: the typed, validated view of one document
//! - [`RepoDocument`]: the generic round-trip tree used to rewrite only the
//!   permission sections of a document while preserving everything else
//!
//! Parsing is pure and synchronous; fetching the bytes is the storage
//! layer's concern.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod aliases;
pub mod document;
pub mod error;
pub mod repo;

pub use aliases::StorageAliases;
pub use document::RepoDocument;
pub use error::{Error, Result};
pub use repo::RepoConfig;

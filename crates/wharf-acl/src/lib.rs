//! # wharf-acl
//!
//! Access control for the Wharf artifact repository:
//!
//! - [`Permissions`]: decides whether an authenticated principal may perform
//!   a named action against a repository, from the repository's
//!   `permissions` section (the serving path)
//! - [`RepoPermissions`]: administrative listing, reading, and rewriting of
//!   the permission sections of the persisted configuration documents (the
//!   management path)
//!
//! The two are deliberately independent: evaluation works on an
//! already-parsed section and never touches storage, administration works on
//! the stored documents and never evaluates.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod manager;
pub mod policy;

pub use error::{Error, Result};
pub use manager::RepoPermissions;
pub use policy::Permissions;

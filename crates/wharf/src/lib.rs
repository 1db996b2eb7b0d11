//! Wharf artifact repository — umbrella crate.
//!
//! Re-exports the configuration and access-control components for
//! convenience:
//!
//! ```rust
//! use std::sync::Arc;
//! use wharf::acl::{Permissions, RepoPermissions};
//! use wharf::core::{PermissionItem, Principal};
//! use wharf::storage::InMemoryStorage;
//!
//! # tokio_test::block_on(async {
//! let manager = RepoPermissions::new(Arc::new(InMemoryStorage::new()));
//! assert!(manager.repositories().await.unwrap().is_empty());
//!
//! let policy = Permissions::new([PermissionItem::new("*", ["download"])]);
//! assert!(policy.allowed(&Principal::new("anyone"), "download"));
//! # });
//! ```

pub use wharf_acl as acl;
pub use wharf_config as config;
pub use wharf_core as core;
pub use wharf_storage as storage;

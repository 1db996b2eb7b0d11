//! # wharf-core
//!
//! Shared value types for the Wharf artifact repository:
//!
//! - Authenticated caller identity ([`Principal`])
//! - Permission policy building blocks ([`PrincipalKey`], [`PermissionItem`],
//!   [`PathPattern`])
//!
//! This crate has no internal Wharf dependencies (dependency level 0) and
//! performs no I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod perms;
pub mod principal;

pub use perms::{PathPattern, PermissionItem, PrincipalKey, WILDCARD};
pub use principal::Principal;

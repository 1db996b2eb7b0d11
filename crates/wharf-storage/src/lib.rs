//! # wharf-storage
//!
//! Blob storage abstraction consumed by the Wharf configuration and
//! access-control layer.
//!
//! Wharf persists one configuration document per repository in a
//! key-addressed blob store. The engine behind that store (filesystem,
//! object storage, database) lives outside this workspace; this crate
//! defines the async interface Wharf consumes ([`BlobStorage`]) and ships an
//! in-memory implementation ([`InMemoryStorage`]) for tests and embedders.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Error, Result};
pub use memory::InMemoryStorage;
pub use traits::BlobStorage;

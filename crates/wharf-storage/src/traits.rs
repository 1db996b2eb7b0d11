//! Storage abstraction traits.

use crate::Result;
use async_trait::async_trait;

/// Key-addressed blob store.
///
/// All operations are async and non-blocking; Wharf composes them without
/// holding locks across await points. Implementations must be safe to share
/// across tasks (`Send + Sync`).
///
/// This layer adds no retry policy: backend failures surface to the caller
/// unchanged.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Read the full value stored under `key`.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) when the key
    /// is absent.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// List all keys starting with `prefix`; an empty prefix lists every
    /// key. Order is unspecified.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Whether a value is stored under `key`.
    async fn exists(&self, key: &str) -> Result<bool> {
        match self.get(key).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Delete the value stored under `key`.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) when the key
    /// is absent.
    async fn delete(&self, key: &str) -> Result<()>;
}

//! In-memory storage backend.

use crate::traits::BlobStorage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory [`BlobStorage`] implementation.
///
/// Cheap to clone (Arc internals); clones share the same map. Intended for
/// tests and for embedders that keep their configuration ephemeral.
///
/// # Examples
///
/// ```
/// use wharf_storage::{BlobStorage, InMemoryStorage};
///
/// # tokio_test::block_on(async {
/// let storage = InMemoryStorage::new();
/// storage.put("maven.yaml", b"repo:\n  type: maven\n".to_vec()).await.unwrap();
/// assert!(storage.exists("maven.yaml").await.unwrap());
/// # });
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStorage for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let blobs = self.blobs.read().await;
        blobs.get(key).cloned().ok_or_else(|| Error::not_found(key))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(key.to_string(), value);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let blobs = self.blobs.read().await;
        Ok(blobs
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let blobs = self.blobs.read().await;
        Ok(blobs.contains_key(key))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        blobs
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(key))
    }
}

//! Administrative management of repository permission sections.

use crate::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;
use wharf_config::RepoDocument;
use wharf_core::{PathPattern, PermissionItem};
use wharf_storage::BlobStorage;

/// Extension of every configuration document key in the blob store.
const CONFIG_EXT: &str = ".yaml";

/// Administrative view over the permission sections of all hosted
/// repositories.
///
/// Each mutation reads the repository's full document, validates it,
/// rewrites only the `permissions` / `permissions_include_patterns`
/// sections, and writes the document back under the same key; every other
/// field is preserved as stored. A document that cannot be read and
/// validated is never overwritten.
///
/// Mutations are read-modify-write with no compare-and-swap: two concurrent
/// updates of the same repository race and the last writer wins. Callers
/// needing stronger guarantees must serialize administrative operations
/// externally.
#[derive(Clone)]
pub struct RepoPermissions {
    storage: Arc<dyn BlobStorage>,
}

impl RepoPermissions {
    /// Create a manager over the given configuration store.
    pub fn new(storage: Arc<dyn BlobStorage>) -> Self {
        Self { storage }
    }

    /// Names of all repositories that have a configuration document.
    ///
    /// Keys without the document extension are not configuration documents
    /// and are skipped.
    pub async fn repositories(&self) -> Result<HashSet<String>> {
        let keys = self.storage.list("").await?;
        Ok(keys
            .iter()
            .filter_map(|key| key.strip_suffix(CONFIG_EXT))
            .map(str::to_string)
            .collect())
    }

    /// The permission items of `repo`, in document order. An absent
    /// `permissions` section yields an empty list.
    pub async fn permissions(&self, repo: &str) -> Result<Vec<PermissionItem>> {
        let document = self.load(repo).await?;
        Ok(document.permissions()?)
    }

    /// The path patterns of `repo`, in document order. An absent section
    /// yields an empty list.
    pub async fn patterns(&self, repo: &str) -> Result<Vec<PathPattern>> {
        let document = self.load(repo).await?;
        Ok(document.patterns()?)
    }

    /// Replace the permission section of `repo` with `permissions` and its
    /// path patterns with `patterns`.
    ///
    /// This is a total replacement, not a merge: principals absent from
    /// `permissions` lose all their permissions. Sections are created when
    /// the document does not have them yet.
    pub async fn update(
        &self,
        repo: &str,
        permissions: &[PermissionItem],
        patterns: &[PathPattern],
    ) -> Result<()> {
        let mut document = self.load(repo).await?;
        document.set_permissions(permissions);
        document.set_patterns(patterns);
        self.store(repo, &document).await?;
        log::debug!(
            "replaced permissions of `{repo}`: {} entries, {} patterns",
            permissions.len(),
            patterns.len()
        );
        Ok(())
    }

    /// Delete the `permissions` section of `repo`. Path patterns and all
    /// other fields stay untouched.
    pub async fn remove(&self, repo: &str) -> Result<()> {
        let mut document = self.load(repo).await?;
        document.clear_permissions();
        self.store(repo, &document).await?;
        log::debug!("removed permission section of `{repo}`");
        Ok(())
    }

    /// Delete the `permissions_include_patterns` section of `repo`. The
    /// permission section and all other fields stay untouched.
    pub async fn remove_patterns(&self, repo: &str) -> Result<()> {
        let mut document = self.load(repo).await?;
        document.clear_patterns();
        self.store(repo, &document).await?;
        log::debug!("removed pattern section of `{repo}`");
        Ok(())
    }

    async fn load(&self, repo: &str) -> Result<RepoDocument> {
        let key = format!("{repo}{CONFIG_EXT}");
        let bytes = match self.storage.get(&key).await {
            Ok(bytes) => bytes,
            Err(err) if err.is_not_found() => {
                return Err(Error::repository_not_found(repo));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(RepoDocument::from_bytes(&bytes)?)
    }

    async fn store(&self, repo: &str, document: &RepoDocument) -> Result<()> {
        let key = format!("{repo}{CONFIG_EXT}");
        self.storage.put(&key, document.to_bytes()?).await?;
        Ok(())
    }
}

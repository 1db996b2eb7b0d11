//! Generic round-trip view of a configuration document.
//!
//! Administrative edits must leave every field they do not own intact,
//! including keys this layer has never heard of. Rewriting the document from
//! the typed [`RepoConfig`](crate::RepoConfig) would silently drop them, so
//! edits go through this generic tree instead: parse, mutate only the
//! `permissions` / `permissions_include_patterns` keys, reserialize.

use crate::{Error, Result};
use serde_yaml::{Mapping, Value};
use wharf_core::{PathPattern, PermissionItem};

const PERMISSIONS: &str = "permissions";
const PATTERNS: &str = "permissions_include_patterns";

/// One repository's configuration document as a mutable YAML tree.
///
/// Construction validates the minimum structure every document must have (a
/// `repo` mapping with a string `type`); a document failing that gate is
/// never written back.
#[derive(Debug, Clone)]
pub struct RepoDocument {
    root: Mapping,
}

impl RepoDocument {
    /// Parse document bytes, validating the `repo` / `repo.type` skeleton.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let root: Value = serde_yaml::from_slice(bytes)?;
        let Value::Mapping(root) = root else {
            return Err(Error::malformed("document root must be a mapping"));
        };
        let Some(repo) = root.get("repo").and_then(Value::as_mapping) else {
            return Err(Error::malformed("missing `repo` mapping"));
        };
        if repo.get("type").and_then(Value::as_str).is_none() {
            return Err(Error::malformed(
                "missing required string field `repo.type`",
            ));
        }
        Ok(Self { root })
    }

    /// The repository type string.
    pub fn repo_type(&self) -> &str {
        // Both lookups were checked in from_bytes.
        self.repo()
            .and_then(|repo| repo.get("type"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The `permissions` section as permission items, in document order.
    ///
    /// An absent section yields an empty list; a present but misshapen one
    /// is a [`Error::Malformed`], never a default.
    pub fn permissions(&self) -> Result<Vec<PermissionItem>> {
        let Some(section) = self
            .repo()
            .and_then(|repo| repo.get(PERMISSIONS))
            .and_then(Value::as_mapping)
        else {
            return Ok(Vec::new());
        };
        let mut items = Vec::with_capacity(section.len());
        for (key, actions) in section {
            let Some(key) = key.as_str() else {
                return Err(Error::malformed("permission keys must be strings"));
            };
            let Some(actions) = actions.as_sequence() else {
                return Err(Error::malformed(format!(
                    "actions of `{key}` must be a sequence"
                )));
            };
            let actions = actions
                .iter()
                .map(|action| {
                    action.as_str().map(str::to_string).ok_or_else(|| {
                        Error::malformed(format!("actions of `{key}` must be strings"))
                    })
                })
                .collect::<Result<Vec<String>>>()?;
            items.push(PermissionItem::new(key, actions));
        }
        Ok(items)
    }

    /// The `permissions_include_patterns` section, in document order; absent
    /// section yields an empty list.
    pub fn patterns(&self) -> Result<Vec<PathPattern>> {
        let Some(section) = self.repo().and_then(|repo| repo.get(PATTERNS)) else {
            return Ok(Vec::new());
        };
        let Some(sequence) = section.as_sequence() else {
            return Err(Error::malformed(format!("`{PATTERNS}` must be a sequence")));
        };
        sequence
            .iter()
            .map(|entry| {
                entry.as_str().map(PathPattern::new).ok_or_else(|| {
                    Error::malformed(format!("`{PATTERNS}` entries must be strings"))
                })
            })
            .collect()
    }

    /// Replace the whole `permissions` section with `items`, creating the
    /// section when absent. Item order becomes document order.
    pub fn set_permissions(&mut self, items: &[PermissionItem]) {
        let mut section = Mapping::new();
        for item in items {
            let actions = item
                .actions()
                .iter()
                .map(|action| Value::from(action.as_str()))
                .collect::<Vec<Value>>();
            section.insert(Value::from(item.raw_key()), Value::Sequence(actions));
        }
        if let Some(repo) = self.repo_mut() {
            repo.insert(Value::from(PERMISSIONS), Value::Mapping(section));
        }
    }

    /// Delete the `permissions` section. All other keys, `permissions_include_patterns`
    /// included, stay untouched.
    pub fn clear_permissions(&mut self) {
        if let Some(repo) = self.repo_mut() {
            repo.remove(PERMISSIONS);
        }
    }

    /// Replace the whole `permissions_include_patterns` section with
    /// `patterns`, creating the section when absent.
    pub fn set_patterns(&mut self, patterns: &[PathPattern]) {
        let sequence = patterns
            .iter()
            .map(|pattern| Value::from(pattern.as_str()))
            .collect::<Vec<Value>>();
        if let Some(repo) = self.repo_mut() {
            repo.insert(Value::from(PATTERNS), Value::Sequence(sequence));
        }
    }

    /// Delete the `permissions_include_patterns` section.
    pub fn clear_patterns(&mut self) {
        if let Some(repo) = self.repo_mut() {
            repo.remove(PATTERNS);
        }
    }

    /// Serialize the tree back to document bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_yaml::to_string(&self.root)?.into_bytes())
    }

    fn repo(&self) -> Option<&Mapping> {
        self.root.get("repo").and_then(Value::as_mapping)
    }

    // Present by the from_bytes invariant; Option only to avoid panicking
    // accessors.
    fn repo_mut(&mut self) -> Option<&mut Mapping> {
        self.root.get_mut("repo").and_then(Value::as_mapping_mut)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DOC: &str = concat!(
        "repo:\n",
        "  type: rpm\n",
        "  storage: default\n",
        "  custom-property: custom-value\n",
        "  permissions:\n",
        "    david: [add, update]\n",
        "  permissions_include_patterns:\n",
        "    - \"**\"\n",
    );

    fn doc() -> RepoDocument {
        RepoDocument::from_bytes(DOC.as_bytes()).unwrap()
    }

    #[test]
    fn test_reads_permissions_in_document_order() {
        let items = doc().permissions().unwrap();
        assert_eq!(items, vec![PermissionItem::new("david", ["add", "update"])]);
    }

    #[test]
    fn test_reads_patterns() {
        assert_eq!(doc().patterns().unwrap(), vec![PathPattern::new("**")]);
    }

    #[test]
    fn test_absent_sections_read_as_empty() {
        let document =
            RepoDocument::from_bytes(b"repo:\n  type: go\n  storage: default\n").unwrap();
        assert!(document.permissions().unwrap().is_empty());
        assert!(document.patterns().unwrap().is_empty());
    }

    #[test]
    fn test_set_permissions_replaces_section() {
        let mut document = doc();
        document.set_permissions(&[
            PermissionItem::new("olga", ["download", "deploy"]),
            PermissionItem::new("david", ["download", "add"]),
        ]);
        let items = document.permissions().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], PermissionItem::new("olga", ["download", "deploy"]));
        // david's old actions are gone, not merged.
        assert_eq!(items[1], PermissionItem::new("david", ["download", "add"]));
    }

    #[test]
    fn test_clear_permissions_keeps_everything_else() {
        let mut document = doc();
        document.clear_permissions();

        let reread = RepoDocument::from_bytes(&document.to_bytes().unwrap()).unwrap();
        assert!(reread.permissions().unwrap().is_empty());
        assert_eq!(reread.patterns().unwrap(), vec![PathPattern::new("**")]);
        assert_eq!(reread.repo_type(), "rpm");
    }

    #[test]
    fn test_roundtrip_preserves_unknown_keys() {
        let mut document = doc();
        document.set_patterns(&[PathPattern::new("rpm/*")]);

        let bytes = document.to_bytes().unwrap();
        let root: Value = serde_yaml::from_slice(&bytes).unwrap();
        let repo = root.get("repo").unwrap();
        assert_eq!(
            repo.get("custom-property").and_then(Value::as_str),
            Some("custom-value")
        );
        assert_eq!(repo.get("storage").and_then(Value::as_str), Some("default"));
    }

    #[test]
    fn test_set_sections_on_document_without_them() {
        let mut document =
            RepoDocument::from_bytes(b"repo:\n  type: go\n  storage: default\n").unwrap();
        document.set_permissions(&[PermissionItem::new("ann", ["download"])]);
        document.set_patterns(&[PathPattern::new("**")]);

        let reread = RepoDocument::from_bytes(&document.to_bytes().unwrap()).unwrap();
        assert_eq!(
            reread.permissions().unwrap(),
            vec![PermissionItem::new("ann", ["download"])]
        );
        assert_eq!(reread.patterns().unwrap(), vec![PathPattern::new("**")]);
    }

    #[test]
    fn test_clear_patterns_only_touches_patterns() {
        let mut document = doc();
        document.clear_patterns();

        let reread = RepoDocument::from_bytes(&document.to_bytes().unwrap()).unwrap();
        assert!(reread.patterns().unwrap().is_empty());
        assert_eq!(reread.permissions().unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_document_without_type() {
        let err = RepoDocument::from_bytes(b"repo:\n  storage: default\n").unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_rejects_scalar_root() {
        let err = RepoDocument::from_bytes(b"just a string\n").unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_misshapen_permissions_are_malformed() {
        let document = RepoDocument::from_bytes(
            b"repo:\n  type: go\n  permissions:\n    ann: not-a-sequence\n",
        )
        .unwrap();
        assert!(matches!(
            document.permissions().unwrap_err(),
            Error::Malformed { .. }
        ));
    }
}

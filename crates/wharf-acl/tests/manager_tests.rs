//! Integration test suite for permission administration.
//!
//! Exercises `RepoPermissions` against the in-memory blob store, verifying
//! listing, full-replacement updates, section removal, and preservation of
//! every field the manager does not own.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use wharf_acl::{Error, RepoPermissions};
use wharf_config::RepoDocument;
use wharf_core::{PathPattern, PermissionItem};
use wharf_storage::{BlobStorage, InMemoryStorage};

fn manager(storage: &InMemoryStorage) -> RepoPermissions {
    RepoPermissions::new(Arc::new(storage.clone()))
}

async fn seed(storage: &InMemoryStorage, repo: &str, body: &str) {
    storage
        .put(&format!("{repo}.yaml"), body.as_bytes().to_vec())
        .await
        .unwrap();
}

async fn stored_document(storage: &InMemoryStorage, repo: &str) -> RepoDocument {
    let bytes = storage.get(&format!("{repo}.yaml")).await.unwrap();
    RepoDocument::from_bytes(&bytes).unwrap()
}

#[tokio::test]
async fn returns_repo_list() {
    let storage = InMemoryStorage::new();
    for key in ["one.yaml", "two.yaml", "abc", "three.yaml"] {
        storage.put(key, Vec::new()).await.unwrap();
    }
    let repos = manager(&storage).repositories().await.unwrap();
    let expected: std::collections::HashSet<String> =
        ["one", "two", "three"].map(String::from).into();
    assert_eq!(repos, expected);
}

#[tokio::test]
async fn returns_permissions_list() {
    let storage = InMemoryStorage::new();
    seed(
        &storage,
        "maven",
        concat!(
            "repo:\n",
            "  type: maven\n",
            "  permissions:\n",
            "    john: [download, upload]\n",
        ),
    )
    .await;
    assert_eq!(
        manager(&storage).permissions("maven").await.unwrap(),
        vec![PermissionItem::new("john", ["download", "upload"])]
    );
}

#[tokio::test]
async fn returns_empty_list_when_permissions_are_not_set() {
    let storage = InMemoryStorage::new();
    seed(&storage, "pypi", "repo:\n  type: pypi\n").await;
    assert!(manager(&storage).permissions("pypi").await.unwrap().is_empty());
}

#[tokio::test]
async fn returns_patterns_list() {
    let storage = InMemoryStorage::new();
    seed(
        &storage,
        "docker",
        concat!(
            "repo:\n",
            "  type: docker\n",
            "  permissions_include_patterns:\n",
            "    - \"**\"\n",
        ),
    )
    .await;
    assert_eq!(
        manager(&storage).patterns("docker").await.unwrap(),
        vec![PathPattern::new("**")]
    );
}

#[tokio::test]
async fn returns_empty_patterns_list_when_not_set() {
    let storage = InMemoryStorage::new();
    seed(&storage, "gem", "repo:\n  type: gem\n").await;
    assert!(manager(&storage).patterns("gem").await.unwrap().is_empty());
}

#[tokio::test]
async fn updates_user_permissions_and_patterns() {
    let storage = InMemoryStorage::new();
    seed(
        &storage,
        "rpm",
        concat!(
            "repo:\n",
            "  type: rpm\n",
            "  permissions:\n",
            "    david: [add, update]\n",
            "  permissions_include_patterns:\n",
            "    - \"**\"\n",
        ),
    )
    .await;

    let manager = manager(&storage);
    manager
        .update(
            "rpm",
            &[
                PermissionItem::new("olga", ["download", "deploy"]),
                PermissionItem::new("victor", ["deploy"]),
                PermissionItem::new("david", ["download", "add"]),
            ],
            &[PathPattern::new("rpm/*")],
        )
        .await
        .unwrap();

    let items = manager.permissions("rpm").await.unwrap();
    assert_eq!(
        items,
        vec![
            PermissionItem::new("olga", ["download", "deploy"]),
            PermissionItem::new("victor", ["deploy"]),
            // Replacement, not merge: david's `update` action is gone.
            PermissionItem::new("david", ["download", "add"]),
        ]
    );
    assert_eq!(
        manager.patterns("rpm").await.unwrap(),
        vec![PathPattern::new("rpm/*")]
    );
}

#[tokio::test]
async fn adds_user_permissions_and_patterns_when_empty() {
    let storage = InMemoryStorage::new();
    seed(&storage, "go", "repo:\n  type: go\n").await;

    let manager = manager(&storage);
    manager
        .update(
            "go",
            &[PermissionItem::new("ann", ["download"])],
            &[PathPattern::new("**")],
        )
        .await
        .unwrap();

    assert_eq!(
        manager.permissions("go").await.unwrap(),
        vec![PermissionItem::new("ann", ["download"])]
    );
    assert_eq!(
        manager.patterns("go").await.unwrap(),
        vec![PathPattern::new("**")]
    );
}

#[tokio::test]
async fn deletes_permission_section_only() {
    let storage = InMemoryStorage::new();
    seed(
        &storage,
        "nuget",
        concat!(
            "repo:\n",
            "  type: nuget\n",
            "  permissions:\n",
            "    someone: [r, w]\n",
            "  permissions_include_patterns:\n",
            "    - \"**\"\n",
        ),
    )
    .await;

    manager(&storage).remove("nuget").await.unwrap();

    let document = stored_document(&storage, "nuget").await;
    assert!(document.permissions().unwrap().is_empty());
    assert_eq!(document.repo_type(), "nuget");
    // Patterns removal is a distinct operation; they survive.
    assert_eq!(document.patterns().unwrap(), vec![PathPattern::new("**")]);
}

#[tokio::test]
async fn deletes_pattern_section_only() {
    let storage = InMemoryStorage::new();
    seed(
        &storage,
        "npm",
        concat!(
            "repo:\n",
            "  type: npm\n",
            "  permissions:\n",
            "    someone: [publish]\n",
            "  permissions_include_patterns:\n",
            "    - \"npm/*\"\n",
        ),
    )
    .await;

    manager(&storage).remove_patterns("npm").await.unwrap();

    let document = stored_document(&storage, "npm").await;
    assert!(document.patterns().unwrap().is_empty());
    assert_eq!(
        document.permissions().unwrap(),
        vec![PermissionItem::new("someone", ["publish"])]
    );
}

#[tokio::test]
async fn update_preserves_unrelated_fields() {
    let storage = InMemoryStorage::new();
    seed(
        &storage,
        "maven",
        concat!(
            "repo:\n",
            "  type: maven\n",
            "  storage: default\n",
            "  port: 8081\n",
            "  content-length-max: 4096\n",
            "  custom-property: custom-value\n",
        ),
    )
    .await;

    manager(&storage)
        .update(
            "maven",
            &[PermissionItem::new("jane", ["deploy"])],
            &[],
        )
        .await
        .unwrap();

    let bytes = storage.get("maven.yaml").await.unwrap();
    let root: serde_yaml::Value = serde_yaml::from_slice(&bytes).unwrap();
    let repo = root.get("repo").unwrap();
    assert_eq!(repo.get("storage").and_then(|v| v.as_str()), Some("default"));
    assert_eq!(repo.get("port").and_then(|v| v.as_u64()), Some(8081));
    assert_eq!(
        repo.get("content-length-max").and_then(|v| v.as_u64()),
        Some(4096)
    );
    assert_eq!(
        repo.get("custom-property").and_then(|v| v.as_str()),
        Some("custom-value")
    );
}

#[tokio::test]
async fn unknown_repository_is_not_found() {
    let storage = InMemoryStorage::new();
    let manager = manager(&storage);

    let err = manager.permissions("ghost").await.unwrap_err();
    assert!(matches!(err, Error::RepositoryNotFound { .. }));

    // No implicit provisioning: update fails the same way and writes nothing.
    let err = manager
        .update("ghost", &[], &[PathPattern::new("**")])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RepositoryNotFound { .. }));
    assert!(!storage.exists("ghost.yaml").await.unwrap());
}

#[tokio::test]
async fn never_writes_over_a_malformed_document() {
    let storage = InMemoryStorage::new();
    seed(&storage, "broken", "repo: [this, is, not, a, mapping]\n").await;

    let err = manager(&storage)
        .update("broken", &[PermissionItem::new("ann", ["download"])], &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    // The stored bytes are exactly what was seeded.
    let bytes = storage.get("broken.yaml").await.unwrap();
    assert_eq!(bytes, b"repo: [this, is, not, a, mapping]\n");
}

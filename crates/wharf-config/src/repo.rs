//! Typed repository configuration.

use crate::{Error, Result, StorageAliases};
use serde_yaml::{Mapping, Value};
use std::fmt;
use wharf_core::PathPattern;

/// Top-level keys of the `repo` mapping this layer interprets. Everything
/// else is opaque protocol-handler settings.
const RECOGNIZED_KEYS: [&str; 6] = [
    "type",
    "storage",
    "permissions",
    "permissions_include_patterns",
    "content-length-max",
    "port",
];

/// Parsed, validated configuration of one hosted repository.
///
/// Reconstructed from the persisted document on every read; nothing here is
/// cached. The struct is plain data: all I/O happens before
/// [`RepoConfig::parse`] is called.
#[derive(Debug, Clone)]
pub struct RepoConfig {
    name: String,
    repo_type: String,
    storage: Mapping,
    settings: Option<Mapping>,
    content_length_max: Option<u64>,
    port: Option<u16>,
    permissions: Option<Mapping>,
    patterns: Vec<PathPattern>,
}

impl RepoConfig {
    /// Parse and validate one repository's configuration document.
    ///
    /// `key` is the document's storage key, carried for diagnostics only.
    /// The `storage` field is resolved through `aliases`; resolution
    /// failures propagate as [`Error::UnresolvedAlias`].
    pub fn parse(bytes: &[u8], aliases: &StorageAliases, key: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_slice(bytes)?;
        let Some(repo) = root.get("repo").and_then(Value::as_mapping) else {
            return Err(Error::malformed(format!("{key}: missing `repo` mapping")));
        };

        let Some(repo_type) = repo.get("type").and_then(Value::as_str) else {
            return Err(Error::malformed(format!(
                "{key}: missing required string field `repo.type`"
            )));
        };

        let Some(storage_fragment) = repo.get("storage") else {
            return Err(Error::malformed(format!(
                "{key}: missing required field `repo.storage`"
            )));
        };
        let storage = aliases.resolve(storage_fragment)?;

        let content_length_max = parse_integer(repo, "content-length-max", key)?;
        // A port must be positive; zero is as misconfigured as 70000.
        let port = match parse_integer(repo, "port", key)? {
            None => None,
            Some(0) => {
                return Err(Error::malformed(format!(
                    "{key}: `repo.port` must be a positive integer"
                )));
            }
            Some(value) => Some(u16::try_from(value).map_err(|_| {
                Error::malformed(format!("{key}: `repo.port` out of range: {value}"))
            })?),
        };

        let permissions = match repo.get("permissions") {
            None => None,
            Some(value) => Some(
                value
                    .as_mapping()
                    .ok_or_else(|| {
                        Error::malformed(format!("{key}: `repo.permissions` must be a mapping"))
                    })?
                    .clone(),
            ),
        };

        let patterns = parse_patterns(repo, key)?;

        let mut settings = repo.clone();
        for recognized in RECOGNIZED_KEYS {
            settings.remove(recognized);
        }
        let settings = if settings.is_empty() {
            None
        } else {
            Some(settings)
        };

        Ok(Self {
            name: key.to_string(),
            repo_type: repo_type.to_string(),
            storage,
            settings,
            content_length_max,
            port,
            permissions,
            patterns,
        })
    }

    /// The storage key this configuration was read from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The repository type, naming the protocol handler that owns it.
    pub fn repo_type(&self) -> &str {
        &self.repo_type
    }

    /// The resolved, concrete storage definition.
    pub fn storage(&self) -> &Mapping {
        &self.storage
    }

    /// Protocol-handler settings: every `repo` key this layer does not
    /// interpret. `None` when the document has no such keys.
    pub fn settings(&self) -> Option<&Mapping> {
        self.settings.as_ref()
    }

    /// Maximum accepted content length in bytes, when configured.
    pub fn content_length_max(&self) -> Option<u64> {
        self.content_length_max
    }

    /// Dedicated listen port, when configured.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The raw `permissions` section. `None` means the server-wide default
    /// policy applies; the distinction from an empty mapping matters.
    pub fn permissions(&self) -> Option<&Mapping> {
        self.permissions.as_ref()
    }

    /// Path patterns scoping the permission policy; empty means
    /// unrestricted by path.
    pub fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }
}

impl fmt::Display for RepoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.repo_type)
    }
}

fn parse_integer(repo: &Mapping, field: &str, key: &str) -> Result<Option<u64>> {
    match repo.get(field) {
        None => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
            Error::malformed(format!(
                "{key}: `repo.{field}` must be a non-negative integer"
            ))
        }),
    }
}

fn parse_patterns(repo: &Mapping, key: &str) -> Result<Vec<PathPattern>> {
    let Some(value) = repo.get("permissions_include_patterns") else {
        return Ok(Vec::new());
    };
    let Some(sequence) = value.as_sequence() else {
        return Err(Error::malformed(format!(
            "{key}: `repo.permissions_include_patterns` must be a sequence"
        )));
    };
    sequence
        .iter()
        .map(|entry| {
            entry.as_str().map(PathPattern::new).ok_or_else(|| {
                Error::malformed(format!(
                    "{key}: pattern entries must be strings"
                ))
            })
        })
        .collect()
}

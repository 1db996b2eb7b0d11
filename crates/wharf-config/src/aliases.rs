//! Shared storage alias table.
//!
//! A repository's `storage` field is either an inline definition or a bare
//! string naming an alias in the server-wide alias file:
//!
//! ```yaml
//! storages:
//!   default:
//!     type: fs
//!     path: /var/wharf/data
//! ```

use crate::{Error, Result};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

/// Table of named storage definitions.
///
/// Resolution is a pure lookup: an inline definition passes through
/// unchanged, an alias name is replaced by the table entry, and a missing
/// entry is an [`Error::UnresolvedAlias`] — never a silent default.
#[derive(Debug, Clone, Default)]
pub struct StorageAliases {
    table: HashMap<String, Mapping>,
}

impl StorageAliases {
    /// Create an empty table (every alias reference will fail to resolve).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a table from the bytes of a `storages:` YAML document.
    pub fn from_yaml(bytes: &[u8]) -> Result<Self> {
        let root: Value = serde_yaml::from_slice(bytes)?;
        let Some(storages) = root.get("storages").and_then(Value::as_mapping) else {
            return Err(Error::malformed("missing `storages` mapping"));
        };
        let mut table = HashMap::new();
        for (name, definition) in storages {
            let Some(name) = name.as_str() else {
                return Err(Error::malformed("storage alias name must be a string"));
            };
            let Some(definition) = definition.as_mapping() else {
                return Err(Error::malformed(format!(
                    "storage alias `{name}` must be a mapping"
                )));
            };
            table.insert(name.to_string(), definition.clone());
        }
        Ok(Self { table })
    }

    /// Add a definition under `name`, replacing any existing one.
    pub fn insert(&mut self, name: impl Into<String>, definition: Mapping) {
        self.table.insert(name.into(), definition);
    }

    /// Resolve a `storage` fragment to a concrete definition.
    ///
    /// The fragment is either an inline mapping (returned as-is) or a string
    /// alias name (looked up in the table).
    pub fn resolve(&self, fragment: &Value) -> Result<Mapping> {
        match fragment {
            Value::Mapping(inline) => Ok(inline.clone()),
            Value::String(alias) => self
                .table
                .get(alias)
                .cloned()
                .ok_or_else(|| Error::unresolved_alias(alias)),
            _ => Err(Error::malformed(
                "`storage` must be a mapping or an alias name",
            )),
        }
    }
}

//! Authenticated caller identity.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// An authenticated caller: a name plus the set of groups the caller
/// belongs to.
///
/// Principals arrive from the authentication layer already verified; this
/// crate only carries them. A principal is constructed once per request and
/// never mutated.
///
/// # Examples
///
/// ```
/// use wharf_core::Principal;
///
/// let alice = Principal::with_groups("alice", ["readers", "deployers"]);
/// assert_eq!(alice.name(), "alice");
/// assert!(alice.in_group("readers"));
/// assert!(!alice.in_group("admins"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    name: String,
    #[serde(default)]
    groups: HashSet<String>,
}

impl Principal {
    /// Create a principal with no group memberships.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: HashSet::new(),
        }
    }

    /// Create a principal with the given group memberships.
    pub fn with_groups<I, S>(name: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// The principal's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The set of groups the principal belongs to.
    pub fn groups(&self) -> &HashSet<String> {
        &self.groups
    }

    /// Whether the principal is a member of `group`.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

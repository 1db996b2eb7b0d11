//! Permission policy value types.
//!
//! A repository's permission section maps a *principal key* to a list of
//! allowed action names. Three kinds of key exist: a literal principal name,
//! a group reference written with a leading `/`, and the wildcard `*` that
//! matches any principal. The wildcard also appears as an action value,
//! where it means "all actions".
//!
//! `*` and the `/` prefix are reserved; callers must not name a real user
//! `*` or start a user name with `/`. This is a documented convention, not
//! an enforced one.

use crate::Principal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved wildcard, valid both as a principal key ("any principal") and as
/// an action value ("all actions").
pub const WILDCARD: &str = "*";

/// Prefix distinguishing a group reference from a literal principal name.
const GROUP_PREFIX: char = '/';

// ============================================================================
// PrincipalKey
// ============================================================================

/// One key of the permission section, classified.
///
/// Keeping the classification in one tagged type keeps the matching rule in
/// one place instead of scattering prefix checks through evaluation logic.
///
/// # Examples
///
/// ```
/// use wharf_core::{Principal, PrincipalKey};
///
/// assert_eq!(PrincipalKey::parse("*"), PrincipalKey::Any);
/// assert_eq!(PrincipalKey::parse("/readers"), PrincipalKey::Group("readers".into()));
/// assert_eq!(PrincipalKey::parse("john"), PrincipalKey::Direct("john".into()));
///
/// let mark = Principal::with_groups("mark", ["readers"]);
/// assert!(PrincipalKey::parse("/readers").matches(&mark));
/// assert!(PrincipalKey::parse("mark").matches(&mark));
/// assert!(!PrincipalKey::parse("olga").matches(&mark));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrincipalKey {
    /// The `*` wildcard: matches every principal.
    Any,
    /// A literal principal name.
    Direct(String),
    /// A `/group` reference: matches members of the group.
    Group(String),
}

impl PrincipalKey {
    /// Classify a raw key string from a permission section.
    pub fn parse(raw: &str) -> Self {
        if raw == WILDCARD {
            Self::Any
        } else if let Some(group) = raw.strip_prefix(GROUP_PREFIX) {
            Self::Group(group.to_string())
        } else {
            Self::Direct(raw.to_string())
        }
    }

    /// Whether this key matches the given principal.
    pub fn matches(&self, principal: &Principal) -> bool {
        match self {
            Self::Any => true,
            Self::Direct(name) => principal.name() == name,
            Self::Group(group) => principal.in_group(group),
        }
    }
}

impl From<&str> for PrincipalKey {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for PrincipalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "{WILDCARD}"),
            Self::Direct(name) => write!(f, "{name}"),
            Self::Group(group) => write!(f, "{GROUP_PREFIX}{group}"),
        }
    }
}

// ============================================================================
// PermissionItem
// ============================================================================

/// One policy rule: a raw principal key and the ordered list of actions it
/// allows.
///
/// The key is kept in its raw string form so that rewriting a document
/// reproduces exactly what the administrator wrote; classify it on demand
/// with [`PermissionItem::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionItem {
    key: String,
    actions: Vec<String>,
}

impl PermissionItem {
    /// Create a rule for `key` allowing `actions`.
    pub fn new<I, S>(key: impl Into<String>, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// The raw principal key as written in the document.
    pub fn raw_key(&self) -> &str {
        &self.key
    }

    /// The classified principal key.
    pub fn key(&self) -> PrincipalKey {
        PrincipalKey::parse(&self.key)
    }

    /// The allowed actions, in document order.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Whether this rule grants `action`, either verbatim or via the action
    /// wildcard.
    pub fn grants(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action || a == WILDCARD)
    }
}

// ============================================================================
// PathPattern
// ============================================================================

/// A glob-style string scoping which repository sub-paths a permission
/// policy applies to.
///
/// Opaque to this layer: matching semantics belong to the protocol
/// handlers. Carried in document order, duplicates allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathPattern(String);

impl PathPattern {
    /// Create a pattern from its glob string.
    pub fn new(glob: impl Into<String>) -> Self {
        Self(glob.into())
    }

    /// The pattern's glob string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PathPattern {
    fn from(glob: &str) -> Self {
        Self::new(glob)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Permission evaluation.

use serde_yaml::Mapping;
use wharf_core::{PermissionItem, Principal};

/// Allow-list permission policy of one repository.
///
/// Captured once from the `permissions` section of a parsed configuration
/// document; stateless afterwards, so a single instance may serve any number
/// of concurrent authorization checks.
///
/// Evaluation is a pure OR across entries: the principal is authorized if
/// *any* entry both matches them (wildcard key, exact name, or group
/// membership) and grants the action (verbatim or via the action wildcard).
/// There is no explicit deny, and no entry ordering dependency. An empty
/// policy denies everything.
///
/// # Examples
///
/// ```
/// use wharf_acl::Permissions;
/// use wharf_core::{PermissionItem, Principal};
///
/// let policy = Permissions::new([
///     PermissionItem::new("john", ["download", "deploy"]),
///     PermissionItem::new("/readers", ["download"]),
///     PermissionItem::new("admin", ["*"]),
/// ]);
///
/// assert!(policy.allowed(&Principal::new("john"), "deploy"));
/// assert!(policy.allowed(&Principal::with_groups("mark", ["readers"]), "download"));
/// assert!(policy.allowed(&Principal::new("admin"), "delete"));
/// assert!(!policy.allowed(&Principal::new("mark"), "deploy"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Permissions {
    entries: Vec<PermissionItem>,
}

impl Permissions {
    /// Build a policy from permission items.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PermissionItem>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Build a policy that denies every request.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Build a policy from the raw `permissions` YAML section.
    ///
    /// Entries whose key is not a string or whose value is not a sequence of
    /// strings are skipped; skipping grants nothing, so a damaged entry
    /// fails closed. (A damaged *document* never reaches this point — the
    /// parser rejects it first.)
    pub fn from_section(section: &Mapping) -> Self {
        let entries = section
            .iter()
            .filter_map(|(key, actions)| {
                let key = key.as_str()?;
                let actions = actions
                    .as_sequence()?
                    .iter()
                    .map(|action| action.as_str().map(str::to_string))
                    .collect::<Option<Vec<String>>>()?;
                Some(PermissionItem::new(key, actions))
            })
            .collect();
        Self { entries }
    }

    /// Whether `principal` may perform `action`.
    pub fn allowed(&self, principal: &Principal, action: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.key().matches(principal) && entry.grants(action))
    }
}

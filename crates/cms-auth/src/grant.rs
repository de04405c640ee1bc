//! Permission grants.
//!
//! A [`PermissionGrant`] is the capability record the security service
//! resolves for a caller and a permission name (e.g. `pb.category`).
//!
//! # Grant Shape
//!
//! ```text
//! { name: "pb.category", rwd: "rw", own: true, ...extension fields }
//!          │                  │          │              │
//!     resource type     letters (opt)  owner-only   domain-specific,
//!     or wildcard       absent = all                e.g. `locales`
//! ```
//!
//! # Name Matching
//!
//! | Grant name | Matches |
//! |------------|---------|
//! | `pb.category` | exactly `pb.category` |
//! | `pb.*` | any name starting with `pb.` |
//! | `*` | every name |

use crate::{Operation, Rwd};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full-access wildcard grant name.
pub const WILDCARD: &str = "*";

/// A capability record scoped to a resource type.
///
/// # Example
///
/// ```
/// use cms_auth::{Operation, PermissionGrant, Rwd};
///
/// let grant = PermissionGrant::new("pb.category").with_rwd(Rwd::READ).owned_only();
/// assert!(grant.allows(Operation::Read));
/// assert!(!grant.allows(Operation::Write));
/// assert!(grant.own);
///
/// let parsed: PermissionGrant =
///     serde_json::from_str(r#"{"name":"pb.category","rwd":"rw"}"#).unwrap();
/// assert!(parsed.allows(Operation::Write));
/// assert!(!parsed.own);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Permission name or wildcard pattern.
    pub name: String,
    /// Allowed letters; `None` means full access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rwd: Option<Rwd>,
    /// Restricts access to records created by the caller.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub own: bool,
    /// Domain-specific fields carried alongside the generic ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PermissionGrant {
    /// Creates a full-access grant for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rwd: None,
            own: false,
            extra: Map::new(),
        }
    }

    /// Creates the `*` grant.
    #[must_use]
    pub fn full_access() -> Self {
        Self::new(WILDCARD)
    }

    /// Narrows the grant to the given letters.
    #[must_use]
    pub fn with_rwd(mut self, rwd: Rwd) -> Self {
        self.rwd = Some(rwd);
        self
    }

    /// Restricts the grant to records owned by the caller.
    #[must_use]
    pub fn owned_only(mut self) -> Self {
        self.own = true;
        self
    }

    /// Attaches an extension field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Letters this grant actually allows.
    #[must_use]
    pub fn effective_rwd(&self) -> Rwd {
        self.rwd.unwrap_or(Rwd::FULL)
    }

    /// Returns `true` if the grant's letters allow `operation`.
    #[must_use]
    pub fn allows(&self, operation: Operation) -> bool {
        self.effective_rwd().contains(operation.required())
    }

    /// Reads an extension field, returning `None` when absent or mistyped.
    ///
    /// ```
    /// use cms_auth::PermissionGrant;
    ///
    /// let grant = PermissionGrant::new("content.i18n").with_field("locales", vec!["en-US"]);
    /// let locales: Vec<String> = grant.field("locales").unwrap();
    /// assert_eq!(locales, vec!["en-US".to_string()]);
    /// assert!(grant.field::<bool>("locales").is_none());
    /// ```
    #[must_use]
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.extra
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// How well this grant's name matches `permission`.
    ///
    /// Returns `None` when it does not match. Higher scores are more
    /// specific: an exact match beats any wildcard, and `pb.*` beats `*`.
    #[must_use]
    pub fn match_score(&self, permission: &str) -> Option<usize> {
        if self.name == permission {
            return Some(usize::MAX);
        }
        if self.name == WILDCARD {
            return Some(0);
        }
        let prefix = self.name.strip_suffix('*')?;
        permission.starts_with(prefix).then_some(prefix.len())
    }

    /// Returns `true` if this grant applies to `permission`.
    #[must_use]
    pub fn matches(&self, permission: &str) -> bool {
        self.match_score(permission).is_some()
    }
}

/// Picks the most specific grant for `permission` from `grants`.
///
/// ```
/// use cms_auth::{grant::best_match, PermissionGrant, Rwd};
///
/// let grants = vec![
///     PermissionGrant::full_access(),
///     PermissionGrant::new("pb.category").with_rwd(Rwd::READ),
/// ];
/// let found = best_match(&grants, "pb.category").unwrap();
/// assert_eq!(found.rwd, Some(Rwd::READ));
/// assert!(best_match(&grants, "cms.manage.settings").is_some());
/// ```
#[must_use]
pub fn best_match<'a>(grants: &'a [PermissionGrant], permission: &str) -> Option<&'a PermissionGrant> {
    grants
        .iter()
        .filter_map(|g| g.match_score(permission).map(|score| (score, g)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, g)| g)
}

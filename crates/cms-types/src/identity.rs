//! Caller identity.
//!
//! An [`Identity`] answers "who is calling". It carries no permission
//! information; grants are resolved separately by the security context.
//! The same shape is stamped onto records as `createdBy`.

use crate::IdentityId;
use serde::{Deserialize, Serialize};

/// The authenticated caller of a resolver.
///
/// Serialized in the wire shape `{ "id": ..., "displayName": ... }`, which is
/// also the shape of a record's `createdBy` field.
///
/// # Example
///
/// ```
/// use cms_types::Identity;
///
/// let alice = Identity::new("u1", "Alice");
/// let json = serde_json::to_value(&alice).unwrap();
/// assert_eq!(json["displayName"], "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable id assigned by the security service.
    pub id: IdentityId,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: String,
}

impl Identity {
    /// Creates an identity.
    #[must_use]
    pub fn new(id: impl Into<IdentityId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Returns `true` if `other` refers to the same caller.
    ///
    /// Only ids are compared; display names may drift between requests.
    #[must_use]
    pub fn is(&self, other: &Identity) -> bool {
        self.id == other.id
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.display_name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.display_name, self.id)
        }
    }
}

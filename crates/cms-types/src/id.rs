//! Identifier types.

use serde::{Deserialize, Serialize};

/// Identifier of an authenticated caller.
///
/// Identity ids are issued by the external security service and are opaque
/// to this workspace, so they are kept as strings rather than UUIDs.
///
/// # Example
///
/// ```
/// use cms_types::IdentityId;
///
/// let a = IdentityId::new("u1");
/// let b: IdentityId = "u1".into();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "u1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(String);

impl IdentityId {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IdentityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for IdentityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for IdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Operation kinds checked against a grant's `rwd` letters.

use crate::Rwd;
use serde::{Deserialize, Serialize};

/// What a resolver does to its resource.
///
/// # Example
///
/// ```
/// use cms_auth::{Operation, Rwd};
///
/// assert_eq!(Operation::Delete.letter(), 'd');
/// assert_eq!(Operation::Write.required(), Rwd::WRITE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Get or list.
    Read,
    /// Create, update, install.
    Write,
    /// Delete.
    Delete,
}

impl Operation {
    /// The `rwd` letter this operation needs.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Read => 'r',
            Self::Write => 'w',
            Self::Delete => 'd',
        }
    }

    /// The flag this operation needs.
    #[must_use]
    pub fn required(self) -> Rwd {
        match self {
            Self::Read => Rwd::READ,
            Self::Write => Rwd::WRITE,
            Self::Delete => Rwd::DELETE,
        }
    }

    /// Lowercase name used in logs and error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

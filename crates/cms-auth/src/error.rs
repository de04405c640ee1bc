//! Access denied error type.
//!
//! [`AccessDenied`] is what a [`Guard`](crate::Guard) returns when it
//! rejects a call. Each variant names the check that failed:
//!
//! ```text
//! HasPermission      HasRwd              HasContentLocale    ownership
//!       │               │                      │                 │
//! MissingPermission  OperationDenied       LocaleDenied        NotOwner
//! ```

use crate::{Operation, Rwd};
use cms_types::{ErrorCode, IdentityId};
use thiserror::Error;

/// Reason a guard rejected a call.
///
/// # Example
///
/// ```
/// use cms_auth::{AccessDenied, Operation, Rwd};
///
/// let err = AccessDenied::OperationDenied {
///     permission: "pb.category".to_string(),
///     operation: Operation::Write,
///     available: Rwd::READ,
/// };
///
/// assert!(err.to_string().contains("pb.category"));
/// assert_eq!(err.check(), "rwd");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// No grant exists for a permission that must be present.
    #[error("missing permission '{permission}'")]
    MissingPermission {
        /// The permission that was required.
        permission: String,
    },

    /// The grant's `rwd` letters do not include the operation.
    #[error("'{permission}' does not allow {operation}, available: {available}")]
    OperationDenied {
        /// The permission that was checked.
        permission: String,
        /// The attempted operation.
        operation: Operation,
        /// Letters the grant holds.
        available: Rwd,
    },

    /// The request's content locale is not covered by the locale grant.
    #[error("content locale '{}' is not permitted", .locale.as_deref().unwrap_or("(none)"))]
    LocaleDenied {
        /// The request locale, if one was set.
        locale: Option<String>,
    },

    /// The grant is owner-only and the record belongs to someone else.
    #[error("'{permission}' is limited to own records; owner is {owner}, caller is {caller}")]
    NotOwner {
        /// The permission that was checked.
        permission: String,
        /// `createdBy.id` of the record.
        owner: IdentityId,
        /// Id of the caller.
        caller: IdentityId,
    },
}

impl AccessDenied {
    /// Short name of the check that denied access.
    #[must_use]
    pub fn check(&self) -> &'static str {
        match self {
            Self::MissingPermission { .. } => "permission",
            Self::OperationDenied { .. } => "rwd",
            Self::LocaleDenied { .. } => "locale",
            Self::NotOwner { .. } => "ownership",
        }
    }
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        "SECURITY_NOT_AUTHORIZED"
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

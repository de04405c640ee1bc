//! Resolver error taxonomy.
//!
//! ```text
//! ResolverError
//! ├── NotAuthorized(AccessDenied)   guard or ownership failure  → notAuthorized
//! ├── NotFound { message }          lookup miss                 → notFound
//! ├── Domain { code, message }      business rule violation     → error(code)
//! └── Unexpected(CrudError)         collaborator failure        → error(code)
//! ```
//!
//! None of these escape a resolver: they are converted into a
//! [`Response`] at the resolver boundary.

use super::Response;
use crate::store::CrudError;
use cms_auth::AccessDenied;
use cms_types::ErrorCode;
use thiserror::Error;

/// Code used for unclassified collaborator failures when no resolver-specific
/// code is configured.
pub const UNEXPECTED_ERROR: &str = "UNEXPECTED_ERROR";

/// Failure inside a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// A guard or the ownership check rejected the call.
    #[error("not authorized: {0}")]
    NotAuthorized(#[from] AccessDenied),

    /// The target record does not exist.
    #[error("{message}")]
    NotFound {
        /// Message naming the lookup key.
        message: String,
    },

    /// A business rule was violated.
    #[error("{message}")]
    Domain {
        /// Machine-readable code, e.g. `CATEGORY_EXISTS`.
        code: String,
        /// Human-readable message.
        message: String,
    },

    /// The CRUD collaborator failed.
    #[error("collaborator failed: {0}")]
    Unexpected(#[from] CrudError),
}

impl ResolverError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a business-rule error.
    #[must_use]
    pub fn domain(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Domain {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Converts into a response.
    ///
    /// Unclassified collaborator failures are reported under
    /// `fallback_code`; rejections that carry their own code keep it.
    #[must_use]
    pub fn into_response<T>(self, fallback_code: &str) -> Response<T> {
        match self {
            Self::NotAuthorized(_) => Response::NotAuthorized,
            Self::NotFound { message } => Response::NotFound { message },
            Self::Domain { code, message } => Response::Error { code, message },
            Self::Unexpected(CrudError::Rejected { code, message }) => {
                Response::Error { code, message }
            }
            Self::Unexpected(CrudError::Storage(message)) => Response::Error {
                code: fallback_code.to_string(),
                message,
            },
        }
    }
}

impl<T> From<ResolverError> for Response<T> {
    fn from(err: ResolverError) -> Self {
        err.into_response(UNEXPECTED_ERROR)
    }
}

impl ErrorCode for ResolverError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotAuthorized(_) => "SECURITY_NOT_AUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Domain { .. } => "DOMAIN_ERROR",
            Self::Unexpected(_) => UNEXPECTED_ERROR,
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Unexpected(err) => err.is_recoverable(),
            Self::Domain { .. } => true,
            Self::NotAuthorized(_) | Self::NotFound { .. } => false,
        }
    }
}

//! Typed resolver responses.

use serde::{Deserialize, Serialize};

/// Code reported for [`Response::NotFound`].
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Code reported for [`Response::NotAuthorized`].
pub const NOT_AUTHORIZED: &str = "SECURITY_NOT_AUTHORIZED";

/// Outcome of a resolver call; exactly one variant per call.
///
/// Serialized with a `kind` tag:
///
/// ```text
/// { "kind": "ok", "data": ... }
/// { "kind": "notFound", "message": "Category \"news\" not found." }
/// { "kind": "notAuthorized" }
/// { "kind": "error", "code": "CMS_SETTINGS_ERROR", "message": "..." }
/// ```
///
/// # Example
///
/// ```
/// use cms_runtime::Response;
///
/// let ok: Response<u32> = Response::ok(7);
/// assert_eq!(ok.data(), Some(&7));
///
/// let denied: Response<u32> = Response::NotAuthorized;
/// assert_eq!(denied.error_code(), Some("SECURITY_NOT_AUTHORIZED"));
/// assert_eq!(
///     serde_json::to_string(&denied).unwrap(),
///     r#"{"kind":"notAuthorized"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Response<T> {
    /// The call succeeded.
    Ok {
        /// Result of the wrapped operation.
        data: T,
    },
    /// The requested record does not exist.
    NotFound {
        /// Message naming the lookup key.
        message: String,
    },
    /// A guard or ownership check rejected the call.
    NotAuthorized,
    /// A business rule or collaborator failure.
    Error {
        /// Machine-readable code.
        code: String,
        /// Human-readable message.
        message: String,
    },
}

impl<T> Response<T> {
    /// Wraps successful data.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self::Ok { data }
    }

    /// Creates a not-found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an error response.
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for [`Response::Ok`].
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Returns `true` for [`Response::NotAuthorized`].
    #[must_use]
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, Self::NotAuthorized)
    }

    /// Returns `true` for [`Response::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The `kind` tag of this response.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ok { .. } => "ok",
            Self::NotFound { .. } => "notFound",
            Self::NotAuthorized => "notAuthorized",
            Self::Error { .. } => "error",
        }
    }

    /// Borrows the data of an `ok` response.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ok { data } => Some(data),
            _ => None,
        }
    }

    /// Takes the data of an `ok` response.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Ok { data } => Some(data),
            _ => None,
        }
    }

    /// Machine-readable code of a failure, `None` for `ok`.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Ok { .. } => None,
            Self::NotFound { .. } => Some(NOT_FOUND),
            Self::NotAuthorized => Some(NOT_AUTHORIZED),
            Self::Error { code, .. } => Some(code),
        }
    }

    /// Human-readable message of a failure, `None` for `ok`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok { .. } => None,
            Self::NotFound { message } | Self::Error { message, .. } => Some(message),
            Self::NotAuthorized => Some("Not authorized!"),
        }
    }

    /// Maps the data of an `ok` response, keeping failures as they are.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        match self {
            Self::Ok { data } => Response::Ok { data: f(data) },
            Self::NotFound { message } => Response::NotFound { message },
            Self::NotAuthorized => Response::NotAuthorized,
            Self::Error { code, message } => Response::Error { code, message },
        }
    }
}

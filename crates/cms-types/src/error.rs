//! Unified error code interface.
//!
//! Every error type in the workspace implements [`ErrorCode`] so that the
//! resolver boundary can turn any failure into a typed response carrying a
//! stable code.
//!
//! # Example
//!
//! ```
//! use cms_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum StoreError {
//!     Missing(String),
//!     Busy,
//! }
//!
//! impl ErrorCode for StoreError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing(_) => "STORE_MISSING",
//!             Self::Busy => "STORE_BUSY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! assert_eq!(StoreError::Busy.code(), "STORE_BUSY");
//! assert!(StoreError::Busy.is_recoverable());
//! ```

/// Machine-readable error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"NOT_FOUND"`, `"CMS_SETTINGS_ERROR"`
/// - **Stable**: codes reach API clients and must not change once shipped
///
/// # Recoverability
///
/// An error is recoverable when retrying, or a corrective user action, may
/// succeed. Authorization failures are not recoverable: they need a
/// different grant, not a retry.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code follows the workspace conventions.
///
/// Checks that the code is non-empty, starts with `expected_prefix`
/// (pass `""` to skip the prefix check) and is UPPER_SNAKE_CASE.
///
/// # Panics
///
/// Panics with a descriptive message if validation fails.
///
/// # Example
///
/// ```
/// use cms_types::{assert_error_code, ErrorCode};
///
/// struct Conflict;
///
/// impl ErrorCode for Conflict {
///     fn code(&self) -> &'static str { "PB_CONFLICT" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Conflict, "PB_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates every error in `errors` with [`assert_error_code`].
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

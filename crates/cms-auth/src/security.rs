//! Security context trait.
//!
//! [`SecurityContext`] is the per-request view of the external security
//! service: who is calling, and which grant they hold for a permission.
//! The trait lives here so guards can consult it; concrete contexts are
//! provided by `cms-runtime` (`StaticSecurity`) or by the embedding
//! application.
//!
//! ```text
//! SecurityContext trait (cms-auth)   <- abstract, consulted by guards
//!          │
//!          └── StaticSecurity (cms-runtime) <- fixed grant list
//! ```

use crate::PermissionGrant;
use async_trait::async_trait;
use cms_types::Identity;

/// Request-scoped security service.
///
/// Implementations must be `Send + Sync`; a context is shared by reference
/// with every guard of the request.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use cms_auth::{PermissionGrant, SecurityContext};
/// use cms_types::Identity;
///
/// struct Anonymous(Identity);
///
/// #[async_trait]
/// impl SecurityContext for Anonymous {
///     async fn permission(&self, _name: &str) -> Option<PermissionGrant> {
///         None
///     }
///
///     fn identity(&self) -> Identity {
///         self.0.clone()
///     }
/// }
/// ```
#[async_trait]
pub trait SecurityContext: Send + Sync {
    /// Returns the caller's grant for `name`, or `None` if they hold none.
    async fn permission(&self, name: &str) -> Option<PermissionGrant>;

    /// Returns the authenticated caller.
    fn identity(&self) -> Identity;
}

//! Request-scoped resolver context.

use crate::store::{CategoryStore, InMemoryCategories, InMemorySettings, SettingsStore};
use cms_auth::SecurityContext;
use std::sync::Arc;

/// Everything a resolver may use while serving one request.
///
/// Passed explicitly to every resolver call; there is no global state.
/// Cloning is cheap (shared `Arc`s) and clones observe the same
/// collaborators.
///
/// # Example
///
/// ```
/// use cms_runtime::{RequestContext, StaticSecurity};
/// use cms_types::Identity;
/// use std::sync::Arc;
///
/// let security = StaticSecurity::new(Identity::new("u1", "Alice"));
/// let ctx = RequestContext::in_memory(Arc::new(security)).with_locale("en-US");
/// assert_eq!(ctx.locale.as_deref(), Some("en-US"));
/// ```
#[derive(Clone)]
pub struct RequestContext {
    /// Security service for the caller.
    pub security: Arc<dyn SecurityContext>,
    /// Content locale of the request, e.g. `en-US`.
    pub locale: Option<String>,
    /// Page-builder categories collaborator.
    pub categories: Arc<dyn CategoryStore>,
    /// Headless-CMS settings collaborator.
    pub settings: Arc<dyn SettingsStore>,
}

impl RequestContext {
    /// Creates a context over explicit collaborators.
    #[must_use]
    pub fn new(
        security: Arc<dyn SecurityContext>,
        categories: Arc<dyn CategoryStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            security,
            locale: None,
            categories,
            settings,
        }
    }

    /// Creates a context with empty in-memory collaborators.
    #[must_use]
    pub fn in_memory(security: Arc<dyn SecurityContext>) -> Self {
        Self::new(
            security,
            Arc::new(InMemoryCategories::new()),
            Arc::new(InMemorySettings::new()),
        )
    }

    /// Sets the content locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Replaces the security context, keeping the collaborators.
    ///
    /// Used to serve several callers against the same data.
    #[must_use]
    pub fn with_security(mut self, security: Arc<dyn SecurityContext>) -> Self {
        self.security = security;
        self
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("identity", &self.security.identity())
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

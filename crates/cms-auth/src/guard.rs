//! Guard predicates and ordered guard chains.
//!
//! A resolver is protected by a list of [`Guard`]s evaluated left to right.
//! The first guard that rejects ends the evaluation; later guards never run.
//!
//! ```text
//! GuardChain [HasPermission, HasContentLocale] ──► HasRwd ──► handler
//!               │ Err               │ Err           │ Err
//!               └───────────────────┴───────────────┴──► notAuthorized
//! ```
//!
//! # Built-in Guards
//!
//! | Guard | Rejects when |
//! |-------|--------------|
//! | [`HasRwd`] | the grant defines `rwd` without the operation letter |
//! | [`HasPermission`] | no grant exists for the named permission |
//! | [`HasContentLocale`] | a `content.i18n` grant lists locales and the request locale is not one of them |

use crate::{AccessDenied, Operation, PermissionGrant, SecurityContext};
use async_trait::async_trait;
use std::sync::Arc;

/// Name of the grant that restricts content locales.
pub const LOCALE_PERMISSION: &str = "content.i18n";

/// Everything a guard may inspect about the call it protects.
pub struct GuardInput<'a> {
    /// Request security context.
    pub security: &'a dyn SecurityContext,
    /// Permission key the resolver is protected by.
    pub permission: &'a str,
    /// Operation the resolver performs.
    pub operation: Operation,
    /// The caller's grant for `permission`, fetched once per call.
    pub grant: Option<&'a PermissionGrant>,
    /// Content locale of the request.
    pub locale: Option<&'a str>,
}

/// A single pass/fail check run before a resolver touches data.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use cms_auth::{AccessDenied, Guard, GuardInput};
///
/// #[derive(Debug)]
/// struct DenyAll;
///
/// #[async_trait]
/// impl Guard for DenyAll {
///     fn name(&self) -> &'static str {
///         "deny_all"
///     }
///
///     async fn check(&self, input: &GuardInput<'_>) -> Result<(), AccessDenied> {
///         Err(AccessDenied::MissingPermission {
///             permission: input.permission.to_string(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Guard: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Passes with `Ok(())` or rejects with the reason.
    async fn check(&self, input: &GuardInput<'_>) -> Result<(), AccessDenied>;
}

/// Ordered list of guards with early exit.
#[derive(Debug, Clone, Default)]
pub struct GuardChain {
    guards: Vec<Arc<dyn Guard>>,
}

impl GuardChain {
    /// Creates an empty chain, which passes every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a guard and returns the chain.
    #[must_use]
    pub fn with(mut self, guard: impl Guard + 'static) -> Self {
        self.push(guard);
        self
    }

    /// Appends a guard.
    pub fn push(&mut self, guard: impl Guard + 'static) {
        self.guards.push(Arc::new(guard));
    }

    /// Number of guards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Returns `true` if the chain has no guards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Guard names in evaluation order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.guards.iter().map(|g| g.name()).collect()
    }

    /// Runs every guard in order and stops at the first rejection.
    ///
    /// # Errors
    ///
    /// Returns the [`AccessDenied`] of the first guard that rejects.
    pub async fn evaluate(&self, input: &GuardInput<'_>) -> Result<(), AccessDenied> {
        for guard in &self.guards {
            if let Err(denied) = guard.check(input).await {
                tracing::warn!(
                    guard = guard.name(),
                    permission = input.permission,
                    operation = %input.operation,
                    reason = %denied,
                    "guard rejected call"
                );
                return Err(denied);
            }
            tracing::debug!(
                guard = guard.name(),
                permission = input.permission,
                operation = %input.operation,
                "guard passed"
            );
        }
        Ok(())
    }
}

/// Checks the grant's `rwd` letters against the operation.
///
/// No grant, or a grant without `rwd`, passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasRwd;

#[async_trait]
impl Guard for HasRwd {
    fn name(&self) -> &'static str {
        "has_rwd"
    }

    async fn check(&self, input: &GuardInput<'_>) -> Result<(), AccessDenied> {
        match input.grant {
            Some(grant) if !grant.allows(input.operation) => Err(AccessDenied::OperationDenied {
                permission: input.permission.to_string(),
                operation: input.operation,
                available: grant.effective_rwd(),
            }),
            _ => Ok(()),
        }
    }
}

/// Requires that the caller holds some grant for a permission.
#[derive(Debug, Clone)]
pub struct HasPermission {
    permission: String,
}

impl HasPermission {
    /// Requires a grant for `permission`.
    #[must_use]
    pub fn new(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
        }
    }
}

#[async_trait]
impl Guard for HasPermission {
    fn name(&self) -> &'static str {
        "has_permission"
    }

    async fn check(&self, input: &GuardInput<'_>) -> Result<(), AccessDenied> {
        // The resolver's own grant is already loaded.
        let present = if self.permission == input.permission {
            input.grant.is_some()
        } else {
            input.security.permission(&self.permission).await.is_some()
        };

        if present {
            Ok(())
        } else {
            Err(AccessDenied::MissingPermission {
                permission: self.permission.clone(),
            })
        }
    }
}

/// Restricts calls to the content locales listed on the `content.i18n` grant.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasContentLocale;

#[async_trait]
impl Guard for HasContentLocale {
    fn name(&self) -> &'static str {
        "has_content_locale"
    }

    async fn check(&self, input: &GuardInput<'_>) -> Result<(), AccessDenied> {
        let Some(grant) = input.security.permission(LOCALE_PERMISSION).await else {
            return Ok(());
        };
        let Some(locales) = grant.field::<Vec<String>>("locales") else {
            return Ok(());
        };

        match input.locale {
            Some(locale) if locales.iter().any(|l| l == locale) => Ok(()),
            other => Err(AccessDenied::LocaleDenied {
                locale: other.map(str::to_string),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rwd;
    use cms_types::Identity;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Grants(Vec<PermissionGrant>);

    #[async_trait]
    impl SecurityContext for Grants {
        async fn permission(&self, name: &str) -> Option<PermissionGrant> {
            crate::grant::best_match(&self.0, name).cloned()
        }

        fn identity(&self) -> Identity {
            Identity::new("u1", "Tester")
        }
    }

    fn input<'a>(
        security: &'a Grants,
        grant: Option<&'a PermissionGrant>,
        operation: Operation,
        locale: Option<&'a str>,
    ) -> GuardInput<'a> {
        GuardInput {
            security,
            permission: "pb.category",
            operation,
            grant,
            locale,
        }
    }

    #[derive(Debug, Default)]
    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Guard for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn check(&self, _input: &GuardInput<'_>) -> Result<(), AccessDenied> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn rwd_rejects_missing_letter() {
        let security = Grants(vec![]);
        let grant = PermissionGrant::new("pb.category").with_rwd(Rwd::READ);

        assert!(HasRwd
            .check(&input(&security, Some(&grant), Operation::Read, None))
            .await
            .is_ok());
        let err = HasRwd
            .check(&input(&security, Some(&grant), Operation::Write, None))
            .await
            .unwrap_err();
        assert_eq!(err.check(), "rwd");
    }

    #[tokio::test]
    async fn rwd_passes_without_grant_or_letters() {
        let security = Grants(vec![]);
        let full = PermissionGrant::new("pb.category");

        assert!(HasRwd
            .check(&input(&security, None, Operation::Delete, None))
            .await
            .is_ok());
        assert!(HasRwd
            .check(&input(&security, Some(&full), Operation::Delete, None))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn has_permission_uses_loaded_grant_for_own_key() {
        let security = Grants(vec![]);
        let grant = PermissionGrant::new("pb.category");
        let guard = HasPermission::new("pb.category");

        assert!(guard
            .check(&input(&security, Some(&grant), Operation::Read, None))
            .await
            .is_ok());
        assert!(guard
            .check(&input(&security, None, Operation::Read, None))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn has_permission_fetches_other_keys() {
        let security = Grants(vec![PermissionGrant::new("pb.*")]);
        assert!(HasPermission::new("pb.page")
            .check(&input(&security, None, Operation::Read, None))
            .await
            .is_ok());
        assert!(HasPermission::new("cms.manage.settings")
            .check(&input(&security, None, Operation::Read, None))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn content_locale_rules() {
        let open = Grants(vec![]);
        assert!(HasContentLocale
            .check(&input(&open, None, Operation::Read, None))
            .await
            .is_ok());

        let unrestricted = Grants(vec![PermissionGrant::new(LOCALE_PERMISSION)]);
        assert!(HasContentLocale
            .check(&input(&unrestricted, None, Operation::Read, Some("fr-FR")))
            .await
            .is_ok());

        let restricted = Grants(vec![
            PermissionGrant::new(LOCALE_PERMISSION).with_field("locales", vec!["en-US"])
        ]);
        assert!(HasContentLocale
            .check(&input(&restricted, None, Operation::Read, Some("en-US")))
            .await
            .is_ok());
        assert!(HasContentLocale
            .check(&input(&restricted, None, Operation::Read, Some("de-DE")))
            .await
            .is_err());
        let err = HasContentLocale
            .check(&input(&restricted, None, Operation::Read, None))
            .await
            .unwrap_err();
        assert_eq!(err, AccessDenied::LocaleDenied { locale: None });
    }

    #[tokio::test]
    async fn chain_stops_at_first_rejection() {
        let security = Grants(vec![]);
        let counter = Arc::new(AtomicUsize::new(0));
        let chain = GuardChain::new()
            .with(Counting(counter.clone()))
            .with(HasPermission::new("cms.manage.settings"))
            .with(Counting(counter.clone()));

        assert_eq!(chain.names(), vec!["counting", "has_permission", "counting"]);

        let err = chain
            .evaluate(&input(&security, None, Operation::Read, None))
            .await
            .unwrap_err();
        assert_eq!(err.check(), "permission");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_chain_passes() {
        let security = Grants(vec![]);
        let chain = GuardChain::new();
        assert!(chain.is_empty());
        assert!(chain
            .evaluate(&input(&security, None, Operation::Delete, None))
            .await
            .is_ok());
    }
}

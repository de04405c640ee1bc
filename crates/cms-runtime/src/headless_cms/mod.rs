//! Headless-CMS installation settings.
//!
//! Both resolvers require a `cms.manage.settings` grant and an allowed
//! content locale. Collaborator failures are reported under a
//! resolver-specific code unless the collaborator already attached one.
//!
//! | Resolver | Operation | Fallback code |
//! |----------|-----------|---------------|
//! | `isInstalled` | read | `CMS_SETTINGS_ERROR` |
//! | `install` | write | `CMS_INSTALLATION_ERROR` |

use crate::resolver::{PermissionedResolver, RequestContext, ResolverError, Response};
use chrono::{DateTime, Utc};
use cms_auth::{HasContentLocale, HasPermission, Operation};
use serde::{Deserialize, Serialize};

/// Grant guarding the settings resolvers.
pub const SETTINGS_PERMISSION: &str = "cms.manage.settings";

/// Fallback code of `isInstalled`.
pub const SETTINGS_ERROR: &str = "CMS_SETTINGS_ERROR";

/// Fallback code of `install`.
pub const INSTALLATION_ERROR: &str = "CMS_INSTALLATION_ERROR";

/// Persisted CMS settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub is_installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_on: Option<DateTime<Utc>>,
}

impl Settings {
    /// Settings of an installation completed now.
    #[must_use]
    pub fn installed_now() -> Self {
        Self {
            is_installed: true,
            installed_on: Some(Utc::now()),
        }
    }
}

/// The settings resolver set.
#[derive(Debug, Clone)]
pub struct SettingsResolvers {
    is_installed: PermissionedResolver,
    install: PermissionedResolver,
}

impl Default for SettingsResolvers {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsResolvers {
    /// Builds the resolver set.
    #[must_use]
    pub fn new() -> Self {
        let guarded = |name: &str, operation: Operation, code: &str| {
            PermissionedResolver::new(name, SETTINGS_PERMISSION, operation)
                .guard(HasPermission::new(SETTINGS_PERMISSION))
                .guard(HasContentLocale)
                .entity("Settings")
                .error_code(code)
        };

        Self {
            is_installed: guarded("isInstalled", Operation::Read, SETTINGS_ERROR),
            install: guarded("install", Operation::Write, INSTALLATION_ERROR),
        }
    }

    /// Reports whether the CMS is installed; `false` when no settings exist.
    pub async fn is_installed(&self, ctx: &RequestContext) -> Response<bool> {
        self.is_installed
            .resolve(ctx, |ctx, _auth| async move {
                let settings = ctx.settings.get().await?;
                Ok::<_, ResolverError>(settings.is_some_and(|s| s.is_installed))
            })
            .await
    }

    /// Installs the CMS.
    pub async fn install(&self, ctx: &RequestContext) -> Response<bool> {
        self.install
            .resolve(ctx, |ctx, auth| async move {
                ctx.settings.install().await?;
                tracing::info!(by = %auth.identity().id, "headless CMS installed");
                Ok::<_, ResolverError>(true)
            })
            .await
    }

    /// The resolvers in declaration order.
    #[must_use]
    pub fn resolvers(&self) -> [&PermissionedResolver; 2] {
        [&self.is_installed, &self.install]
    }
}

//! Security context over an in-memory grant list.

use async_trait::async_trait;
use cms_auth::grant::best_match;
use cms_auth::{PermissionGrant, SecurityContext};
use cms_types::Identity;
use parking_lot::RwLock;

/// A caller with a fixed identity and a mutable grant list.
///
/// Lookups follow the grant name rules of [`PermissionGrant`]: an exact
/// name wins over wildcards, and the longest wildcard prefix wins among
/// wildcards.
///
/// # Thread Safety
///
/// Grants live behind a `parking_lot::RwLock`; concurrent lookups share the
/// read lock and [`grant`](Self::grant) / [`revoke`](Self::revoke) take the
/// write lock.
///
/// # Example
///
/// ```
/// use cms_auth::{PermissionGrant, Rwd, SecurityContext};
/// use cms_runtime::StaticSecurity;
/// use cms_types::Identity;
///
/// # #[tokio::main]
/// # async fn main() {
/// let security = StaticSecurity::new(Identity::new("u1", "Alice"))
///     .with_grant(PermissionGrant::new("pb.*").with_rwd(Rwd::READ));
///
/// let grant = security.permission("pb.category").await.unwrap();
/// assert_eq!(grant.name, "pb.*");
/// assert!(security.permission("cms.manage.settings").await.is_none());
/// # }
/// ```
#[derive(Debug)]
pub struct StaticSecurity {
    identity: Identity,
    grants: RwLock<Vec<PermissionGrant>>,
}

impl StaticSecurity {
    /// Creates a context for `identity` holding no grants.
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            grants: RwLock::new(Vec::new()),
        }
    }

    /// Adds a grant and returns the context.
    #[must_use]
    pub fn with_grant(self, grant: PermissionGrant) -> Self {
        self.grant(grant);
        self
    }

    /// Adds several grants and returns the context.
    #[must_use]
    pub fn with_grants(self, grants: impl IntoIterator<Item = PermissionGrant>) -> Self {
        for grant in grants {
            self.grant(grant);
        }
        self
    }

    /// Adds a grant, replacing any grant with the same name.
    pub fn grant(&self, grant: PermissionGrant) {
        let mut grants = self.grants.write();
        if let Some(existing) = grants.iter_mut().find(|g| g.name == grant.name) {
            tracing::debug!(name = %grant.name, "replacing grant");
            *existing = grant;
        } else {
            grants.push(grant);
        }
    }

    /// Removes the grant named `name`. Returns `true` if one was removed.
    pub fn revoke(&self, name: &str) -> bool {
        let mut grants = self.grants.write();
        let before = grants.len();
        grants.retain(|g| g.name != name);
        grants.len() != before
    }

    /// Snapshot of the held grants.
    #[must_use]
    pub fn grants(&self) -> Vec<PermissionGrant> {
        self.grants.read().clone()
    }
}

#[async_trait]
impl SecurityContext for StaticSecurity {
    async fn permission(&self, name: &str) -> Option<PermissionGrant> {
        let grants = self.grants.read();
        let found = best_match(&grants, name).cloned();
        tracing::debug!(
            caller = %self.identity.id,
            permission = name,
            matched = found.as_ref().map(|g| g.name.as_str()),
            "permission lookup"
        );
        found
    }

    fn identity(&self) -> Identity {
        self.identity.clone()
    }
}

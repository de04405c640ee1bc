//! Permission-composed resolvers.
//!
//! A [`PermissionedResolver`] wraps a data operation with the checks every
//! CMS resolver repeats:
//!
//! ```text
//! fetch grant ──► middleware guards ──► rwd letter ──► handler ──► exists? ──► owner? ──► ok
//!                     │                    │                         │           │
//!                     └──── notAuthorized ─┘                    notFound   notAuthorized
//! ```
//!
//! 1. The caller's grant for the permission key is fetched once. No grant
//!    means no restriction.
//! 2. Middleware guards run left to right, then the grant's `rwd` letters
//!    are checked against the operation. The handler never runs on
//!    rejection.
//! 3. Single-record operations report a missing record as `notFound`, then
//!    reject records the caller does not own when the grant is owner-only.
//!    A foreign record is reported as `notAuthorized`, so its existence is
//!    visible.
//! 4. List operations are narrowed to the caller's records instead.
//!
//! Every failure is converted into a [`Response`] here; nothing propagates
//! past the resolver.

mod context;
mod error;
mod response;

pub use context::RequestContext;
pub use error::{ResolverError, UNEXPECTED_ERROR};
pub use response::{Response, NOT_AUTHORIZED, NOT_FOUND};

use crate::store::CrudError;
use cms_auth::{
    ensure_owner, retain_owned, AccessDenied, Guard, GuardChain, GuardInput, HasRwd, Identity,
    Operation, Owned, PermissionGrant,
};
use std::future::Future;

/// Outcome of a passed guard chain, handed to the handler.
///
/// Carries the grant that was checked so the handler can apply ownership
/// rules, and the caller identity so it can stamp new records.
#[derive(Debug, Clone)]
pub struct Authorized {
    grant: Option<PermissionGrant>,
    identity: Identity,
}

impl Authorized {
    /// The caller.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The grant the call was authorized with, if any.
    #[must_use]
    pub fn grant(&self) -> Option<&PermissionGrant> {
        self.grant.as_ref()
    }

    /// Returns `true` if only the caller's own records are accessible.
    #[must_use]
    pub fn is_owner_only(&self) -> bool {
        self.grant.as_ref().is_some_and(|g| g.own)
    }

    /// Rejects a record the caller may not touch.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::NotOwner`] for a foreign record under an
    /// owner-only grant.
    pub fn ensure_owner<T: Owned>(&self, record: &T) -> Result<(), AccessDenied> {
        ensure_owner(self.grant.as_ref(), &self.identity, record)
    }

    /// Narrows a collection to what the caller may see.
    #[must_use]
    pub fn retain_owned<T: Owned>(&self, records: Vec<T>) -> Vec<T> {
        retain_owned(self.grant.as_ref(), &self.identity, records)
    }
}

/// A resolver guarded by a permission key, an operation kind and an
/// ordered guard chain.
///
/// # Example
///
/// ```
/// use cms_auth::{Operation, PermissionGrant, Rwd};
/// use cms_runtime::{
///     PermissionedResolver, RequestContext, ResolverError, Response, StaticSecurity,
/// };
/// use cms_types::Identity;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let security = StaticSecurity::new(Identity::new("u1", "Reader"))
///     .with_grant(PermissionGrant::new("pb.category").with_rwd(Rwd::READ));
/// let ctx = RequestContext::in_memory(Arc::new(security));
///
/// let count = PermissionedResolver::new("countCategories", "pb.category", Operation::Read);
/// let response = count
///     .resolve(&ctx, |ctx, _auth| async move {
///         Ok::<_, ResolverError>(ctx.categories.list().await?.len())
///     })
///     .await;
/// assert_eq!(response, Response::ok(0));
///
/// let purge = PermissionedResolver::new("purgeCategories", "pb.category", Operation::Delete);
/// let response = purge.resolve(&ctx, |_, _| async { Ok(()) }).await;
/// assert!(response.is_not_authorized());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PermissionedResolver {
    name: String,
    permission: Option<String>,
    operation: Operation,
    guards: GuardChain,
    entity: String,
    error_code: String,
}

impl PermissionedResolver {
    /// Creates a resolver protected by `permission` for `operation`.
    #[must_use]
    pub fn new(name: impl Into<String>, permission: impl Into<String>, operation: Operation) -> Self {
        Self {
            name: name.into(),
            permission: Some(permission.into()),
            operation,
            guards: GuardChain::new(),
            entity: "Record".to_string(),
            error_code: UNEXPECTED_ERROR.to_string(),
        }
    }

    /// Creates a resolver with no permission key and no guards.
    ///
    /// Existence checks and error mapping still apply.
    #[must_use]
    pub fn public(name: impl Into<String>, operation: Operation) -> Self {
        Self {
            permission: None,
            ..Self::new(name, String::new(), operation)
        }
    }

    /// Appends a middleware guard, evaluated before the `rwd` check.
    #[must_use]
    pub fn guard(mut self, guard: impl Guard + 'static) -> Self {
        self.guards.push(guard);
        self
    }

    /// Sets the record label used in not-found messages.
    #[must_use]
    pub fn entity(mut self, label: impl Into<String>) -> Self {
        self.entity = label.into();
        self
    }

    /// Sets the code reported for unclassified collaborator failures.
    #[must_use]
    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = code.into();
        self
    }

    /// Resolver name used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Permission key, `None` for public resolvers.
    #[must_use]
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// Operation kind.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Middleware guard names in evaluation order.
    #[must_use]
    pub fn guard_names(&self) -> Vec<&'static str> {
        self.guards.names()
    }

    /// Runs the guard chain and the `rwd` check.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::NotAuthorized`] with the first rejection.
    pub async fn authorize(&self, ctx: &RequestContext) -> Result<Authorized, ResolverError> {
        let identity = ctx.security.identity();
        let Some(permission) = self.permission.as_deref() else {
            return Ok(Authorized {
                grant: None,
                identity,
            });
        };

        let grant = ctx.security.permission(permission).await;
        {
            let input = GuardInput {
                security: ctx.security.as_ref(),
                permission,
                operation: self.operation,
                grant: grant.as_ref(),
                locale: ctx.locale.as_deref(),
            };
            self.guards.evaluate(&input).await?;
            if let Err(denied) = HasRwd.check(&input).await {
                tracing::warn!(
                    resolver = %self.name,
                    permission,
                    operation = %self.operation,
                    reason = %denied,
                    "rwd check rejected call"
                );
                return Err(denied.into());
            }
        }

        tracing::debug!(
            resolver = %self.name,
            permission,
            caller = %identity.id,
            owner_only = grant.as_ref().is_some_and(|g| g.own),
            "authorized"
        );
        Ok(Authorized { grant, identity })
    }

    /// Authorizes, then runs `handler` with no target record.
    ///
    /// Used for create-style operations and operations on singletons.
    pub async fn resolve<T, F, Fut>(&self, ctx: &RequestContext, handler: F) -> Response<T>
    where
        F: FnOnce(RequestContext, Authorized) -> Fut,
        Fut: Future<Output = Result<T, ResolverError>>,
    {
        let result = match self.authorize(ctx).await {
            Ok(auth) => handler(ctx.clone(), auth).await,
            Err(err) => Err(err),
        };
        self.respond(result)
    }

    /// Authorizes, loads the record under `key`, checks existence and
    /// ownership, then runs `act` on it.
    pub async fn resolve_entity<E, T, Fetch, FetchFut, Act, ActFut>(
        &self,
        ctx: &RequestContext,
        key: &str,
        fetch: Fetch,
        act: Act,
    ) -> Response<T>
    where
        E: Owned,
        Fetch: FnOnce(RequestContext, String) -> FetchFut,
        FetchFut: Future<Output = Result<Option<E>, CrudError>>,
        Act: FnOnce(RequestContext, Authorized, E) -> ActFut,
        ActFut: Future<Output = Result<T, ResolverError>>,
    {
        let key = key.to_string();
        self.resolve(ctx, move |ctx, auth| async move {
            let record = fetch(ctx.clone(), key.clone())
                .await?
                .ok_or_else(|| self.missing(&key))?;
            auth.ensure_owner(&record)?;
            act(ctx, auth, record).await
        })
        .await
    }

    /// Authorizes and returns the record under `key`.
    pub async fn get<E, Fetch, FetchFut>(
        &self,
        ctx: &RequestContext,
        key: &str,
        fetch: Fetch,
    ) -> Response<E>
    where
        E: Owned,
        Fetch: FnOnce(RequestContext, String) -> FetchFut,
        FetchFut: Future<Output = Result<Option<E>, CrudError>>,
    {
        self.resolve_entity(ctx, key, fetch, |_, _, record| async move {
            Ok::<_, ResolverError>(record)
        })
        .await
    }

    /// Authorizes, loads a collection and narrows it to the caller's records
    /// under an owner-only grant.
    pub async fn resolve_list<E, Fetch, FetchFut>(
        &self,
        ctx: &RequestContext,
        fetch: Fetch,
    ) -> Response<Vec<E>>
    where
        E: Owned,
        Fetch: FnOnce(RequestContext) -> FetchFut,
        FetchFut: Future<Output = Result<Vec<E>, CrudError>>,
    {
        self.resolve(ctx, move |ctx, auth| async move {
            let records = fetch(ctx).await?;
            Ok::<_, ResolverError>(auth.retain_owned(records))
        })
        .await
    }

    fn missing(&self, key: &str) -> ResolverError {
        ResolverError::not_found(format!("{} \"{}\" not found.", self.entity, key))
    }

    fn respond<T>(&self, result: Result<T, ResolverError>) -> Response<T> {
        match result {
            Ok(data) => {
                tracing::debug!(resolver = %self.name, "resolved");
                Response::ok(data)
            }
            Err(err) => {
                match &err {
                    ResolverError::Unexpected(source) => tracing::error!(
                        resolver = %self.name,
                        error = %source,
                        "collaborator failed"
                    ),
                    ResolverError::NotAuthorized(denied) => tracing::info!(
                        resolver = %self.name,
                        check = denied.check(),
                        reason = %denied,
                        "not authorized"
                    ),
                    other => tracing::debug!(
                        resolver = %self.name,
                        error = %other,
                        "resolver failed"
                    ),
                }
                err.into_response(&self.error_code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticSecurity;
    use cms_auth::{HasPermission, Rwd};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        key: String,
        owner: Identity,
    }

    impl Owned for Note {
        fn created_by(&self) -> &Identity {
            &self.owner
        }
    }

    fn note(key: &str, owner: &str) -> Note {
        Note {
            key: key.to_string(),
            owner: Identity::new(owner, ""),
        }
    }

    fn notes() -> Vec<Note> {
        vec![note("a", "u1"), note("b", "u2"), note("c", "u1")]
    }

    async fn fetch_note(_ctx: RequestContext, key: String) -> Result<Option<Note>, CrudError> {
        Ok(notes().into_iter().find(|n| n.key == key))
    }

    async fn fetch_notes(_ctx: RequestContext) -> Result<Vec<Note>, CrudError> {
        Ok(notes())
    }

    fn ctx_with(grants: Vec<PermissionGrant>) -> RequestContext {
        let security = StaticSecurity::new(Identity::new("u1", "Caller")).with_grants(grants);
        RequestContext::in_memory(Arc::new(security))
    }

    fn resolver(operation: Operation) -> PermissionedResolver {
        PermissionedResolver::new("noteOp", "notes", operation).entity("Note")
    }

    #[tokio::test]
    async fn missing_letter_never_invokes_handler() {
        let calls = Arc::new(AtomicUsize::new(0));

        for bits in 0..=Rwd::FULL.bits() {
            let rwd = Rwd::from_bits_truncate(bits);
            for operation in [Operation::Read, Operation::Write, Operation::Delete] {
                if rwd.contains(operation.required()) {
                    continue;
                }
                let ctx = ctx_with(vec![PermissionGrant::new("notes").with_rwd(rwd)]);
                let counter = calls.clone();
                let response = resolver(operation)
                    .resolve(&ctx, move |_, _| async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    })
                    .await;
                assert!(response.is_not_authorized(), "rwd={rwd} op={operation}");
            }
        }

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn present_letter_invokes_handler() {
        let ctx = ctx_with(vec![PermissionGrant::new("notes").with_rwd(Rwd::DELETE)]);
        let response = resolver(Operation::Delete)
            .resolve(&ctx, |_, _| async { Ok("deleted") })
            .await;
        assert_eq!(response, Response::ok("deleted"));
    }

    #[tokio::test]
    async fn absent_grant_means_no_restriction() {
        let ctx = ctx_with(vec![]);
        let response = resolver(Operation::Read).get(&ctx, "b", fetch_note).await;
        assert_eq!(response, Response::ok(note("b", "u2")));
    }

    #[tokio::test]
    async fn plain_grant_behaves_like_public_resolver() {
        let guarded_ctx = ctx_with(vec![PermissionGrant::new("notes")]);
        let open_ctx = ctx_with(vec![]);
        let public = PermissionedResolver::public("noteOp", Operation::Read).entity("Note");

        for key in ["a", "b", "missing"] {
            let guarded = resolver(Operation::Read).get(&guarded_ctx, key, fetch_note).await;
            let unguarded = public.get(&open_ctx, key, fetch_note).await;
            assert_eq!(guarded, unguarded, "key={key}");
        }

        let guarded = resolver(Operation::Read).resolve_list(&guarded_ctx, fetch_notes).await;
        let unguarded = public.resolve_list(&open_ctx, fetch_notes).await;
        assert_eq!(guarded, unguarded);
    }

    #[tokio::test]
    async fn missing_record_names_the_key() {
        let ctx = ctx_with(vec![]);
        let response = resolver(Operation::Read).get(&ctx, "zzz", fetch_note).await;
        assert_eq!(response, Response::not_found("Note \"zzz\" not found."));
    }

    #[tokio::test]
    async fn owner_only_rejects_foreign_record_after_existence_check() {
        let ctx = ctx_with(vec![PermissionGrant::new("notes").owned_only()]);
        let r = resolver(Operation::Read);

        assert!(r.get(&ctx, "b", fetch_note).await.is_not_authorized());
        assert!(r.get(&ctx, "missing", fetch_note).await.is_not_found());
        assert!(r.get(&ctx, "a", fetch_note).await.is_ok());
    }

    #[tokio::test]
    async fn owner_only_filters_lists() {
        let ctx = ctx_with(vec![PermissionGrant::new("notes").owned_only()]);
        let response = resolver(Operation::Read).resolve_list(&ctx, fetch_notes).await;
        let keys: Vec<_> = response
            .into_data()
            .expect("ok")
            .into_iter()
            .map(|n| n.key)
            .collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn act_is_skipped_for_foreign_records() {
        let ctx = ctx_with(vec![PermissionGrant::new("notes").owned_only()]);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let response = resolver(Operation::Delete)
            .resolve_entity(&ctx, "b", fetch_note, move |_, _, n| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(n)
            })
            .await;

        assert!(response.is_not_authorized());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn middleware_guards_run_before_rwd() {
        let ctx = ctx_with(vec![]);
        let r = resolver(Operation::Read).guard(HasPermission::new("notes"));
        assert_eq!(r.guard_names(), vec!["has_permission"]);

        let response = r.resolve(&ctx, |_, _| async { Ok(()) }).await;
        assert!(response.is_not_authorized());
    }

    #[tokio::test]
    async fn storage_failures_use_resolver_code() {
        let ctx = ctx_with(vec![]);
        let response = resolver(Operation::Read)
            .error_code("NOTES_ERROR")
            .resolve_list(&ctx, |_| async {
                Err::<Vec<Note>, _>(CrudError::storage("disk on fire"))
            })
            .await;
        assert_eq!(response, Response::error("NOTES_ERROR", "disk on fire"));
    }

    #[tokio::test]
    async fn authorized_exposes_identity_and_grant() {
        let ctx = ctx_with(vec![PermissionGrant::new("notes").owned_only()]);
        let auth = resolver(Operation::Write)
            .authorize(&ctx)
            .await
            .expect("authorized");
        assert_eq!(auth.identity().id.as_str(), "u1");
        assert!(auth.is_owner_only());
        assert_eq!(auth.grant().map(|g| g.name.as_str()), Some("notes"));
    }
}

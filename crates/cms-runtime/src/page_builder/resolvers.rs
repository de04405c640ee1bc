//! Category resolvers.

use super::{Category, CategoryInput};
use crate::resolver::{PermissionedResolver, RequestContext, ResolverError, Response};
use crate::store::CrudError;
use cms_auth::{HasContentLocale, HasPermission, Operation};

/// Grant guarding every category resolver.
pub const CATEGORY_PERMISSION: &str = "pb.category";

/// Code for unclassified collaborator failures.
pub const CATEGORY_ERROR: &str = "PB_CATEGORY_ERROR";

/// Code for a create or rename onto a slug that is already taken.
pub const CATEGORY_EXISTS: &str = "CATEGORY_EXISTS";

/// Code for input that cannot be stored.
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";

async fn fetch_category(ctx: RequestContext, slug: String) -> Result<Option<Category>, CrudError> {
    ctx.categories.get(&slug).await
}

/// The category resolver set.
///
/// # Example
///
/// ```
/// use cms_auth::{PermissionGrant, Rwd};
/// use cms_runtime::page_builder::{CategoryInput, CategoryResolvers};
/// use cms_runtime::{RequestContext, StaticSecurity};
/// use cms_types::Identity;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let security = StaticSecurity::new(Identity::new("u1", "Editor"))
///     .with_grant(PermissionGrant::new("pb.category").with_rwd(Rwd::READ | Rwd::WRITE));
/// let ctx = RequestContext::in_memory(Arc::new(security));
/// let categories = CategoryResolvers::new();
///
/// let created = categories
///     .create_category(&ctx, CategoryInput::with_slug("news").name("News"))
///     .await;
/// assert!(created.is_ok());
///
/// let deleted = categories.delete_category(&ctx, "news").await;
/// assert!(deleted.is_not_authorized());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CategoryResolvers {
    get: PermissionedResolver,
    list: PermissionedResolver,
    get_by_slug: PermissionedResolver,
    create: PermissionedResolver,
    update: PermissionedResolver,
    delete: PermissionedResolver,
}

impl Default for CategoryResolvers {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryResolvers {
    /// Builds the resolver set.
    #[must_use]
    pub fn new() -> Self {
        let guarded = |name: &str, operation: Operation| {
            PermissionedResolver::new(name, CATEGORY_PERMISSION, operation)
                .guard(HasPermission::new(CATEGORY_PERMISSION))
                .guard(HasContentLocale)
                .entity("Category")
                .error_code(CATEGORY_ERROR)
        };

        Self {
            get: guarded("getCategory", Operation::Read),
            list: guarded("listCategories", Operation::Read),
            get_by_slug: PermissionedResolver::public("getCategoryBySlug", Operation::Read)
                .entity("Category")
                .error_code(CATEGORY_ERROR),
            create: guarded("createCategory", Operation::Write),
            update: guarded("updateCategory", Operation::Write),
            delete: guarded("deleteCategory", Operation::Delete),
        }
    }

    /// Loads the category under `slug`.
    pub async fn get_category(&self, ctx: &RequestContext, slug: &str) -> Response<Category> {
        self.get.get(ctx, slug, fetch_category).await
    }

    /// Lists categories visible to the caller, in storage order.
    pub async fn list_categories(&self, ctx: &RequestContext) -> Response<Vec<Category>> {
        self.list
            .resolve_list(ctx, |ctx| async move { ctx.categories.list().await })
            .await
    }

    /// Loads the category under `slug` without any permission check.
    pub async fn get_category_by_slug(
        &self,
        ctx: &RequestContext,
        slug: &str,
    ) -> Response<Category> {
        self.get_by_slug.get(ctx, slug, fetch_category).await
    }

    /// Creates a category owned by the caller.
    ///
    /// Fails with `VALIDATION_FAILED` when the slug is blank and with
    /// `CATEGORY_EXISTS` when it is taken.
    pub async fn create_category(
        &self,
        ctx: &RequestContext,
        input: CategoryInput,
    ) -> Response<Category> {
        self.create
            .resolve(ctx, move |ctx, auth| async move {
                let slug = input
                    .slug()
                    .ok_or_else(|| {
                        ResolverError::domain(VALIDATION_FAILED, "Category slug is required.")
                    })?
                    .to_string();

                if ctx.categories.get(&slug).await?.is_some() {
                    return Err(ResolverError::domain(
                        CATEGORY_EXISTS,
                        format!("Category with slug \"{slug}\" already exists."),
                    ));
                }

                let category = Category::create(slug, input, auth.identity().clone());
                ctx.categories.create(category.clone()).await?;
                tracing::info!(slug = %category.slug, owner = %category.created_by.id, "category created");
                Ok(category)
            })
            .await
    }

    /// Patches the category under `slug` and returns the stored result.
    pub async fn update_category(
        &self,
        ctx: &RequestContext,
        slug: &str,
        input: CategoryInput,
    ) -> Response<Category> {
        self.update
            .resolve_entity(ctx, slug, fetch_category, move |ctx, _auth, mut category| async move {
                let key = category.slug.clone();
                category.apply(input);
                ctx.categories.update(&key, category.clone()).await?;

                fetch_category(ctx, category.slug.clone())
                    .await?
                    .ok_or_else(|| {
                        ResolverError::not_found(format!("Category \"{}\" not found.", category.slug))
                    })
            })
            .await
    }

    /// Deletes the category under `slug` and returns it.
    pub async fn delete_category(&self, ctx: &RequestContext, slug: &str) -> Response<Category> {
        self.delete
            .resolve_entity(ctx, slug, fetch_category, |ctx, _auth, category| async move {
                ctx.categories.delete(&category.slug).await?;
                tracing::info!(slug = %category.slug, "category deleted");
                Ok::<_, ResolverError>(category)
            })
            .await
    }

    /// The resolvers in declaration order, for listing and diagnostics.
    #[must_use]
    pub fn resolvers(&self) -> [&PermissionedResolver; 6] {
        [
            &self.get,
            &self.list,
            &self.get_by_slug,
            &self.create,
            &self.update,
            &self.delete,
        ]
    }
}

//! CMS Runtime - permission-composed CRUD resolvers.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Primitives                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cms-types : IdentityId, Identity, ErrorCode                │
//! │  cms-auth  : Rwd, PermissionGrant, SecurityContext, Guard   │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  resolver/     : PermissionedResolver, Response, context    │
//! │  page_builder/ : Category, CategoryResolvers                │
//! │  headless_cms/ : Settings, SettingsResolvers                │
//! │  store/        : CRUD collaborator traits + in-memory impls │
//! │  auth/         : StaticSecurity                             │
//! │  config/       : CmsConfig, ConfigLoader                    │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend (cms-cli)                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! ## [`resolver`] - Resolver Composition
//!
//! - [`PermissionedResolver`]: guard chain, `rwd` check, existence and
//!   ownership checks around a handler
//! - [`Response`]: `ok | notFound | notAuthorized | error`
//! - [`RequestContext`]: security, locale and collaborators of one request
//!
//! ## [`page_builder`] / [`headless_cms`] - Resolver Sets
//!
//! - [`CategoryResolvers`](page_builder::CategoryResolvers): `pb.category`
//! - [`SettingsResolvers`](headless_cms::SettingsResolvers): `cms.manage.settings`
//!
//! ## [`store`] - CRUD Collaborators
//!
//! Async traits the resolvers delegate to, with in-memory implementations.
//!
//! ## [`config`] - Configuration Management
//!
//! Layered TOML configuration that builds a [`RequestContext`].

pub mod auth;
pub mod config;
pub mod headless_cms;
pub mod page_builder;
pub mod resolver;
pub mod store;

pub use auth::StaticSecurity;
pub use resolver::{
    Authorized, PermissionedResolver, RequestContext, ResolverError, Response, NOT_AUTHORIZED,
    NOT_FOUND, UNEXPECTED_ERROR,
};
pub use store::{CategoryStore, CrudError, SettingsStore};

//! Permission primitives for CMS resolvers.
//!
//! # Permission Model
//!
//! ```text
//! Effective access = Guards(WHO may call) ∩ Rwd(WHAT they may do) ∩ Ownership(WHICH records)
//! ```
//!
//! | Layer | Type | Controls |
//! |-------|------|----------|
//! | [`Guard`] / [`GuardChain`] | Trait + ordered list | Whether the call may proceed at all |
//! | [`Rwd`] on [`PermissionGrant`] | Bitflags | Which operations (read, write, delete) |
//! | [`Owned`] + `own` flag | Trait + bool | Which records (all, or the caller's own) |
//!
//! # Crate Architecture
//!
//! ```text
//! cms-types  (IdentityId, Identity, ErrorCode)
//!     ↑
//! cms-auth   (Rwd, PermissionGrant, SecurityContext, Guard)  ◄── THIS CRATE
//!     ↑
//! cms-runtime (PermissionedResolver, StaticSecurity, resolvers)
//! ```
//!
//! Traits are defined here and implemented by consumers: `cms-runtime`
//! provides `StaticSecurity` for [`SecurityContext`] and its entities
//! implement [`Owned`].

pub mod error;
pub mod grant;
pub mod guard;
pub mod operation;
pub mod ownership;
pub mod rwd;
pub mod security;

pub use error::AccessDenied;
pub use grant::PermissionGrant;
pub use guard::{
    Guard, GuardChain, GuardInput, HasContentLocale, HasPermission, HasRwd, LOCALE_PERMISSION,
};
pub use operation::Operation;
pub use ownership::{ensure_owner, retain_owned, Owned};
pub use rwd::Rwd;
pub use security::SecurityContext;

pub use cms_types::{Identity, IdentityId};

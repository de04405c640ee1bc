//! Core types for the CMS resolver crates.
//!
//! This crate holds the identity types every other crate needs and the
//! [`ErrorCode`] trait used to give errors stable, machine-readable codes.
//!
//! # Crate Architecture
//!
//! ```text
//! cms-types    : IdentityId, Identity, ErrorCode   ◄── HERE
//!     ↑
//! cms-auth     : Rwd, PermissionGrant, Guard, SecurityContext
//!     ↑
//! cms-runtime  : PermissionedResolver, Response, category/settings resolvers
//!     ↑
//! cms-cli      : `cms` admin binary
//! ```
//!
//! # Example
//!
//! ```
//! use cms_types::{Identity, IdentityId};
//!
//! let caller = Identity::new("u1", "Jane Doe");
//! assert_eq!(caller.id, IdentityId::new("u1"));
//! assert_eq!(caller.to_string(), "Jane Doe (u1)");
//! ```

mod error;
mod id;
mod identity;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::IdentityId;
pub use identity::Identity;

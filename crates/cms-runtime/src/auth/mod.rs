//! Security context implementations.
//!
//! ```text
//! SecurityContext trait (cms-auth)     <- abstract definition
//!          │
//!          └── StaticSecurity (THIS MODULE)  <- fixed identity, in-memory grants
//! ```

mod static_security;

pub use static_security::StaticSecurity;

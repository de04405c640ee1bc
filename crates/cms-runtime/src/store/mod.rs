//! CRUD collaborators.
//!
//! Resolvers never own data. They forward to a collaborator that knows how
//! to load and persist records:
//!
//! ```text
//! CategoryStore / SettingsStore traits (THIS MODULE)   <- abstract
//!          │
//!          ├── InMemoryCategories / InMemorySettings   <- bundled impls
//!          └── (embedder) database-backed stores
//! ```
//!
//! Every method is async and may fail with [`CrudError`]. A failure the
//! collaborator already classified (`Rejected`) keeps its code all the way
//! to the response; anything else is reported under the resolver's own
//! error code.

mod memory;

pub use memory::{InMemoryCategories, InMemorySettings};

use crate::headless_cms::Settings;
use crate::page_builder::Category;
use async_trait::async_trait;
use cms_types::ErrorCode;
use thiserror::Error;

/// Error raised by a CRUD collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrudError {
    /// The collaborator refused the call with its own typed code.
    #[error("{message}")]
    Rejected {
        /// Code to surface to the client unchanged.
        code: String,
        /// Human-readable reason.
        message: String,
    },

    /// Storage failed in a way the collaborator did not classify.
    #[error("{0}")]
    Storage(String),
}

impl CrudError {
    /// Creates a typed rejection.
    #[must_use]
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates an unclassified storage failure.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl ErrorCode for CrudError {
    fn code(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "CRUD_REJECTED",
            Self::Storage(_) => "CRUD_STORAGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Page-builder category collaborator, keyed by slug.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Loads a category by slug.
    async fn get(&self, slug: &str) -> Result<Option<Category>, CrudError>;

    /// Loads every category in creation order.
    async fn list(&self) -> Result<Vec<Category>, CrudError>;

    /// Persists a new category.
    async fn create(&self, category: Category) -> Result<(), CrudError>;

    /// Replaces the category stored under `slug`.
    ///
    /// `category.slug` may differ from `slug` when the slug is renamed.
    async fn update(&self, slug: &str, category: Category) -> Result<(), CrudError>;

    /// Removes the category stored under `slug`.
    async fn delete(&self, slug: &str) -> Result<(), CrudError>;
}

/// Headless-CMS settings collaborator.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads the settings record, `None` before the first install.
    async fn get(&self) -> Result<Option<Settings>, CrudError>;

    /// Runs the installation and records it in the settings.
    async fn install(&self) -> Result<(), CrudError>;
}

//! In-memory collaborators.
//!
//! [`InMemoryCategories`] and [`InMemorySettings`] back the CLI and the
//! tests. Both use `parking_lot::RwLock` so reads (get, list) proceed
//! concurrently and writes are serialized.

use super::{CategoryStore, CrudError, SettingsStore};
use crate::headless_cms::Settings;
use crate::page_builder::{Category, CATEGORY_EXISTS};
use async_trait::async_trait;
use parking_lot::RwLock;

/// Category store holding records in creation order.
///
/// # Example
///
/// ```
/// use cms_runtime::page_builder::{Category, CategoryInput};
/// use cms_runtime::store::{CategoryStore, InMemoryCategories};
/// use cms_types::Identity;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = InMemoryCategories::new();
/// let news = Category::create("news", CategoryInput::default(), Identity::new("u1", ""));
/// store.create(news).await.unwrap();
///
/// assert!(store.get("news").await.unwrap().is_some());
/// assert_eq!(store.len(), 1);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCategories {
    records: RwLock<Vec<Category>>,
}

impl InMemoryCategories {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `records`.
    ///
    /// Later records with an already used slug are dropped.
    #[must_use]
    pub fn seeded(records: impl IntoIterator<Item = Category>) -> Self {
        let mut unique: Vec<Category> = Vec::new();
        for record in records {
            if unique.iter().any(|c| c.slug == record.slug) {
                tracing::warn!(slug = %record.slug, "dropping duplicate seed category");
                continue;
            }
            unique.push(record);
        }
        Self {
            records: RwLock::new(unique),
        }
    }

    /// Number of stored categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if no category is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategories {
    async fn get(&self, slug: &str) -> Result<Option<Category>, CrudError> {
        Ok(self.records.read().iter().find(|c| c.slug == slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, CrudError> {
        Ok(self.records.read().clone())
    }

    async fn create(&self, category: Category) -> Result<(), CrudError> {
        let mut records = self.records.write();
        if records.iter().any(|c| c.slug == category.slug) {
            return Err(CrudError::rejected(
                CATEGORY_EXISTS,
                format!("Category with slug \"{}\" already exists.", category.slug),
            ));
        }
        records.push(category);
        Ok(())
    }

    async fn update(&self, slug: &str, category: Category) -> Result<(), CrudError> {
        let mut records = self.records.write();
        let index = records
            .iter()
            .position(|c| c.slug == slug)
            .ok_or_else(|| CrudError::storage(format!("no category stored under \"{slug}\"")))?;
        if category.slug != slug && records.iter().any(|c| c.slug == category.slug) {
            return Err(CrudError::rejected(
                CATEGORY_EXISTS,
                format!("Category with slug \"{}\" already exists.", category.slug),
            ));
        }
        records[index] = category;
        Ok(())
    }

    async fn delete(&self, slug: &str) -> Result<(), CrudError> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|c| c.slug != slug);
        if records.len() == before {
            return Err(CrudError::storage(format!(
                "no category stored under \"{slug}\""
            )));
        }
        Ok(())
    }
}

/// Settings store for a single CMS installation.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    settings: RwLock<Option<Settings>>,
}

impl InMemorySettings {
    /// Creates a store for a CMS that has not been installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store for a CMS that is already installed.
    #[must_use]
    pub fn installed() -> Self {
        Self {
            settings: RwLock::new(Some(Settings::installed_now())),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettings {
    async fn get(&self) -> Result<Option<Settings>, CrudError> {
        Ok(self.settings.read().clone())
    }

    async fn install(&self) -> Result<(), CrudError> {
        let mut settings = self.settings.write();
        if settings.as_ref().is_some_and(|s| s.is_installed) {
            return Err(CrudError::rejected(
                "CMS_ALREADY_INSTALLED",
                "The app is already installed.",
            ));
        }
        tracing::info!("installing headless CMS");
        *settings = Some(Settings::installed_now());
        Ok(())
    }
}

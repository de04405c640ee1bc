//! Configuration types.
//!
//! All types implement [`Default`]; every field is optional in a config
//! file. Layered scalars are `Option`s so that a layer which sets a value
//! back to its default still overrides the layer below.

use crate::auth::StaticSecurity;
use crate::page_builder::{Category, CategoryInput};
use crate::resolver::RequestContext;
use crate::store::{InMemoryCategories, InMemorySettings};
use cms_auth::PermissionGrant;
use cms_types::Identity;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Main configuration structure, after merging all layers.
///
/// # Example
///
/// ```
/// use cms_runtime::config::CmsConfig;
///
/// let config = CmsConfig::from_toml(r#"
/// locale = "en-US"
///
/// [identity]
/// id = "u1"
///
/// [[grants]]
/// name = "pb.category"
/// rwd = "r"
/// "#).unwrap();
///
/// assert_eq!(config.identity().id.as_str(), "u1");
/// assert!(!config.settings.installed());
/// assert_eq!(config.grants[0].name, "pb.category");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CmsConfig {
    /// Content locale of requests, e.g. `en-US`.
    pub locale: Option<String>,

    /// The caller.
    pub identity: IdentityConfig,

    /// Grants held by the caller.
    pub grants: Vec<PermissionGrant>,

    /// Categories present before the first request.
    pub categories: Vec<CategorySeed>,

    /// Installation state of the headless CMS.
    pub settings: SettingsConfig,
}

impl CmsConfig {
    /// Creates a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Scalars set in `other` override, even when set to their default.
    /// Grants and categories are merged by name and slug: an entry in
    /// `other` replaces the entry with the same key, new keys are appended.
    pub fn merge(&mut self, other: &Self) {
        if other.locale.is_some() {
            self.locale.clone_from(&other.locale);
        }

        self.identity.merge(&other.identity);

        for grant in &other.grants {
            match self.grants.iter_mut().find(|g| g.name == grant.name) {
                Some(existing) => *existing = grant.clone(),
                None => self.grants.push(grant.clone()),
            }
        }

        for seed in &other.categories {
            match self.categories.iter_mut().find(|c| c.slug == seed.slug) {
                Some(existing) => *existing = seed.clone(),
                None => self.categories.push(seed.clone()),
            }
        }

        if other.settings.installed.is_some() {
            self.settings.installed = other.settings.installed;
        }
    }

    /// The configured caller.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.identity.id(), self.identity.display_name())
    }

    /// A security context for the configured caller and grants.
    #[must_use]
    pub fn security(&self) -> StaticSecurity {
        StaticSecurity::new(self.identity()).with_grants(self.grants.iter().cloned())
    }

    /// Builds the seed categories, owned by the configured caller unless a
    /// seed names another owner.
    ///
    /// Seeds without a slug are dropped.
    #[must_use]
    pub fn seed_categories(&self) -> Vec<Category> {
        let caller = self.identity();
        self.categories
            .iter()
            .filter(|seed| {
                let blank = seed.slug.trim().is_empty();
                if blank {
                    tracing::warn!(name = %seed.name, "dropping seed category without slug");
                }
                !blank
            })
            .map(|seed| {
                let owner = match &seed.created_by {
                    Some(id) if id.as_str() != caller.id.as_str() => Identity::new(id.as_str(), ""),
                    _ => caller.clone(),
                };
                Category::create(seed.slug.as_str(), seed.input(), owner)
            })
            .collect()
    }

    /// Builds a request context over in-memory collaborators.
    #[must_use]
    pub fn into_context(self) -> RequestContext {
        let categories = InMemoryCategories::seeded(self.seed_categories());
        let settings = if self.settings.installed() {
            InMemorySettings::installed()
        } else {
            InMemorySettings::new()
        };

        let ctx = RequestContext::new(
            Arc::new(self.security()),
            Arc::new(categories),
            Arc::new(settings),
        );
        match self.locale {
            Some(locale) => ctx.with_locale(locale),
            None => ctx,
        }
    }
}

/// Identity id used when no layer sets one.
pub const ANONYMOUS: &str = "anonymous";

/// Caller identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IdentityConfig {
    /// Identity id, [`ANONYMOUS`] when unset.
    pub id: Option<String>,

    /// Display name, empty when unset.
    pub display_name: Option<String>,
}

impl IdentityConfig {
    /// Effective identity id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(ANONYMOUS)
    }

    /// Effective display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or_default()
    }

    fn merge(&mut self, other: &Self) {
        if other.id.is_some() {
            self.id.clone_from(&other.id);
        }
        if other.display_name.is_some() {
            self.display_name.clone_from(&other.display_name);
        }
    }
}

/// A category to create at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategorySeed {
    pub slug: String,
    pub name: String,
    pub url: String,
    pub layout: Option<Value>,
    /// Owner id; the configured caller when absent.
    pub created_by: Option<String>,
}

impl CategorySeed {
    fn input(&self) -> CategoryInput {
        CategoryInput {
            name: Some(self.name.clone()),
            url: Some(self.url.clone()),
            layout: self.layout.clone(),
            ..CategoryInput::default()
        }
    }
}

/// Headless-CMS settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsConfig {
    /// Start with the CMS already installed.
    pub installed: Option<bool>,
}

impl SettingsConfig {
    /// Effective installation flag, `false` when unset.
    #[must_use]
    pub fn installed(&self) -> bool {
        self.installed.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_auth::{Operation, Rwd};

    const FIXTURE: &str = r#"
locale = "de-DE"

[identity]
id = "u1"
display_name = "Alice"

[[grants]]
name = "pb.category"
rwd = "rw"
own = true

[[grants]]
name = "content.i18n"
locales = ["en-US", "de-DE"]

[[categories]]
slug = "news"
name = "News"
url = "/news/"

[[categories]]
slug = "blog"
name = "Blog"
created_by = "u2"

[settings]
installed = true
"#;

    #[test]
    fn default_identity_is_anonymous() {
        let config = CmsConfig::default();
        assert_eq!(config.identity().id.as_str(), "anonymous");
        assert!(config.grants.is_empty());
        assert!(!config.settings.installed());
    }

    #[test]
    fn parses_full_fixture() {
        let config = CmsConfig::from_toml(FIXTURE).expect("parse");

        assert_eq!(config.locale.as_deref(), Some("de-DE"));
        assert_eq!(config.identity().display_name, "Alice");

        let category = &config.grants[0];
        assert_eq!(category.rwd, Some(Rwd::READ | Rwd::WRITE));
        assert!(category.own);
        assert!(!category.allows(Operation::Delete));

        let locales: Vec<String> = config.grants[1].field("locales").expect("locales");
        assert_eq!(locales, vec!["en-US", "de-DE"]);

        assert_eq!(config.categories.len(), 2);
        assert!(config.settings.installed());
    }

    #[test]
    fn seeds_take_owner_from_config() {
        let config = CmsConfig::from_toml(FIXTURE).expect("parse");
        let seeds = config.seed_categories();

        assert_eq!(seeds[0].created_by, config.identity());
        assert_eq!(seeds[0].url, "/news/");
        assert_eq!(seeds[1].created_by.id.as_str(), "u2");
    }

    #[test]
    fn merge_replaces_by_key_and_appends() {
        let mut base = CmsConfig::from_toml(FIXTURE).expect("parse");
        let overlay = CmsConfig::from_toml(
            r#"
[[grants]]
name = "pb.category"
rwd = "r"

[[grants]]
name = "cms.manage.settings"

[[categories]]
slug = "news"
name = "Latest"
"#,
        )
        .expect("parse");

        base.merge(&overlay);

        assert_eq!(base.grants.len(), 3);
        assert_eq!(base.grants[0].rwd, Some(Rwd::READ));
        assert!(!base.grants[0].own);
        assert_eq!(base.categories[0].name, "Latest");
        assert_eq!(base.identity.id(), "u1");
        assert_eq!(base.locale.as_deref(), Some("de-DE"));
    }

    #[test]
    fn explicit_defaults_override_lower_layers() {
        let mut base = CmsConfig::from_toml(FIXTURE).expect("parse");
        let overlay = CmsConfig::from_toml(
            r#"
[identity]
id = "anonymous"
display_name = ""

[settings]
installed = false
"#,
        )
        .expect("parse");

        base.merge(&overlay);

        assert_eq!(base.identity.id(), ANONYMOUS);
        assert_eq!(base.identity.display_name(), "");
        assert!(!base.settings.installed());
    }

    #[test]
    fn unset_fields_keep_lower_layers() {
        let mut base = CmsConfig::from_toml(FIXTURE).expect("parse");
        base.merge(&CmsConfig::from_toml("[identity]\n[settings]\n").expect("parse"));

        assert_eq!(base.identity.id(), "u1");
        assert_eq!(base.identity.display_name(), "Alice");
        assert!(base.settings.installed());
    }

    #[test]
    fn blank_seed_slugs_are_dropped() {
        let config = CmsConfig::from_toml(
            r#"
[[categories]]
name = "No slug"

[[categories]]
slug = "  "
name = "Blank"

[[categories]]
slug = "news"
name = "News"
"#,
        )
        .expect("parse");

        let seeds = config.seed_categories();
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].slug, "news");
    }

    #[tokio::test]
    async fn context_reflects_config() {
        let ctx = CmsConfig::from_toml(FIXTURE).expect("parse").into_context();

        assert_eq!(ctx.locale.as_deref(), Some("de-DE"));
        assert_eq!(ctx.security.identity().id.as_str(), "u1");
        assert!(ctx.security.permission("pb.category").await.is_some());
        assert_eq!(ctx.categories.list().await.expect("list").len(), 2);
        assert!(ctx
            .settings
            .get()
            .await
            .expect("get")
            .is_some_and(|s| s.is_installed));
    }
}

//! Page-builder category record.

use chrono::{DateTime, Utc};
use cms_auth::Owned;
use cms_types::Identity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page category, keyed by its slug.
///
/// `id`, `created_on` and `created_by` are fixed at creation; everything
/// else can be patched with [`CategoryInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// Layout name or layout document; opaque to the resolvers.
    #[serde(default)]
    pub layout: Value,
    pub created_on: DateTime<Utc>,
    pub created_by: Identity,
}

impl Category {
    /// Builds a new record for `slug` stamped with its creator.
    ///
    /// Input fields other than `id` and `slug` are copied; the id is always
    /// freshly generated.
    #[must_use]
    pub fn create(slug: impl Into<String>, input: CategoryInput, created_by: Identity) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            slug: slug.into(),
            name: input.name.unwrap_or_default(),
            url: input.url.unwrap_or_default(),
            layout: input.layout.unwrap_or(Value::Null),
            created_on: Utc::now(),
            created_by,
        }
    }

    /// Applies the fields present in `input`.
    ///
    /// `id` in the input is ignored; a blank slug leaves the slug unchanged.
    pub fn apply(&mut self, input: CategoryInput) {
        if let Some(slug) = input.slug() {
            self.slug = slug.to_string();
        }
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(url) = input.url {
            self.url = url;
        }
        if let Some(layout) = input.layout {
            self.layout = layout;
        }
    }
}

impl Owned for Category {
    fn created_by(&self) -> &Identity {
        &self.created_by
    }
}

/// Client-supplied category fields for create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
}

impl CategoryInput {
    /// Input carrying only a slug.
    #[must_use]
    pub fn with_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// The slug, if present and not blank.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

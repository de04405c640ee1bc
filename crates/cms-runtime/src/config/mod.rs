//! Layered configuration.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌──────────────────────────────────────────┐
//! │  1. Environment Variables (CMS_*)        │  Runtime override
//! ├──────────────────────────────────────────┤
//! │  2. Explicit File (--config FILE)        │  Fixture / deployment
//! ├──────────────────────────────────────────┤
//! │  3. Global Config (~/.cms/config.toml)   │  User defaults
//! ├──────────────────────────────────────────┤
//! │  4. Default Values                       │  Anonymous, no grants
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `CMS_LOCALE` | `locale` | String |
//! | `CMS_IDENTITY_ID` | `identity.id` | String |
//! | `CMS_IDENTITY_NAME` | `identity.display_name` | String |
//! | `CMS_INSTALLED` | `settings.installed` | bool |
//!
//! # Example Configuration
//!
//! ```toml
//! locale = "en-US"
//!
//! [identity]
//! id = "u1"
//! display_name = "Alice"
//!
//! [[grants]]
//! name = "pb.category"
//! rwd = "rw"
//! own = true
//!
//! [[grants]]
//! name = "content.i18n"
//! locales = ["en-US", "de-DE"]
//!
//! [[categories]]
//! slug = "news"
//! name = "News"
//! url = "/news/"
//! created_by = "u2"
//!
//! [settings]
//! installed = false
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::{CategorySeed, CmsConfig, IdentityConfig, SettingsConfig, ANONYMOUS};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".cms")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join(CONFIG_FILE)
}

/// Config file name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

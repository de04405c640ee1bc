//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values
//! 2. Global config (`~/.cms/config.toml`)
//! 3. Explicit config file (`--config FILE`)
//! 4. Environment variables (`CMS_*`)
//!
//! Each layer overrides the previous.

use super::{default_config_path, CmsConfig, ConfigError};
use std::path::{Path, PathBuf};
use tracing::debug;

macro_rules! parse_env_bool {
    ($field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            $field = Some(
                parse_bool(&val)
                    .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?,
            );
        }
    };
}

macro_rules! parse_env_string {
    ($field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            if val.trim().is_empty() {
                return Err(ConfigError::invalid_env_var($var, "must not be empty"));
            }
            $field = Some(val);
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use cms_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_file("fixtures/editor.toml")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), cms_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Global config file path (defaults to ~/.cms/config.toml).
    global_config_path: Option<PathBuf>,

    /// Explicit config file; must exist when set.
    file: Option<PathBuf>,

    /// Skip environment variable loading.
    skip_env: bool,

    /// Skip global config loading.
    skip_global: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets an explicit config file, layered over the global config.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be read or
    /// parsed, if the explicit file is missing, or if an environment
    /// variable holds an invalid value. A missing global file is ignored.
    pub fn load(&self) -> Result<CmsConfig, ConfigError> {
        let mut config = CmsConfig::default();

        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global_config) = self.load_file(&global_path)? {
                debug!(path = %global_path.display(), "Loaded global config");
                config.merge(&global_config);
            }
        }

        if let Some(ref path) = self.file {
            let file_config = self
                .load_file(path)?
                .ok_or_else(|| ConfigError::missing_file(path))?;
            debug!(path = %path.display(), "Loaded config file");
            config.merge(&file_config);
        }

        if !self.skip_env {
            self.apply_env_vars(&mut config)?;
        }

        Ok(config)
    }

    /// Loads a config file, returning None if it doesn't exist.
    fn load_file(&self, path: &Path) -> Result<Option<CmsConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

        let config =
            CmsConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        Ok(Some(config))
    }

    /// Applies environment variable overrides.
    fn apply_env_vars(&self, config: &mut CmsConfig) -> Result<(), ConfigError> {
        parse_env_string!(config.identity.id, "CMS_IDENTITY_ID");
        parse_env_bool!(config.settings.installed, "CMS_INSTALLED");

        if let Ok(val) = std::env::var("CMS_IDENTITY_NAME") {
            config.identity.display_name = Some(val);
        }
        if let Ok(val) = std::env::var("CMS_LOCALE") {
            config.locale = Some(val);
        }

        Ok(())
    }
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off"
/// (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{CacheError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Same as [`AppConfig::load`] with an explicit config file path.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (e.g. GEMINI_CACHE__GEMINI__DEFAULT_TTL)
            .add_source(
                Environment::with_prefix("GEMINI_CACHE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| CacheError::Configuration(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CacheError::Configuration(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gemini-cache")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

impl GeminiConfig {
    /// Apply a mutation in place and hand the config back.
    ///
    /// ```
    /// use gemini_cache::config::GeminiConfig;
    ///
    /// let mut config = GeminiConfig::default();
    /// config.configure(|c| {
    ///     c.api_key = Some("your-api-key".to_string());
    ///     c.default_ttl = 600;
    /// });
    /// assert_eq!(config.default_ttl, 600);
    /// ```
    pub fn configure<F>(&mut self, mutator: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        mutator(self);
        self
    }

    /// Configured API key, or `GEMINI_API_KEY` from the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.to_string());
        }

        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CacheError::Configuration(format!(
                    "no API key configured and {} is not set",
                    API_KEY_ENV
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeminiConfig::default();
        assert_eq!(config.api_base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.default_model, "gemini-1.5-flash-8b");
        assert_eq!(config.default_ttl, 300);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_explicit_key_wins() {
        let mut config = GeminiConfig::default();
        config.configure(|c| c.api_key = Some("explicit-key".to_string()));
        assert_eq!(config.resolve_api_key().unwrap(), "explicit-key");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[gemini]\ndefault_model = \"gemini-1.5-pro\"\ndefault_ttl = 900\n\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.gemini.default_model, "gemini-1.5-pro");
        assert_eq!(config.gemini.default_ttl, 900);
        assert_eq!(config.gemini.api_base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}

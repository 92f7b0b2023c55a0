// Configuration and API key resolution tests
// Author: kelexine (https://github.com/kelexine)

use gemini_cache::config::{AppConfig, GeminiConfig, API_KEY_ENV};
use gemini_cache::{CacheError, GeminiCache};

#[test]
fn test_app_config_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.gemini.default_model, "gemini-1.5-flash-8b");
    assert_eq!(config.gemini.default_ttl, 300);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "pretty");
}

#[test]
fn test_configure_chains() {
    let mut config = GeminiConfig::default();
    config
        .configure(|c| c.default_model = "gemini-1.5-pro".to_string())
        .configure(|c| c.default_ttl = 3600);

    assert_eq!(config.default_model, "gemini-1.5-pro");
    assert_eq!(config.default_ttl, 3600);
}

// Only test in this binary that touches the process environment
#[test]
fn test_api_key_resolution_from_environment() {
    std::env::remove_var(API_KEY_ENV);

    let config = GeminiConfig::default();
    assert!(matches!(
        config.resolve_api_key(),
        Err(CacheError::Configuration(_))
    ));
    assert!(matches!(
        GeminiCache::new(config.clone()),
        Err(CacheError::Configuration(_))
    ));

    let mut blank = config.clone();
    blank.configure(|c| c.api_key = Some("   ".to_string()));
    assert!(blank.resolve_api_key().is_err());

    std::env::set_var(API_KEY_ENV, "env-key");
    assert_eq!(config.resolve_api_key().unwrap(), "env-key");
    assert!(GeminiCache::new(config).is_ok());

    std::env::remove_var(API_KEY_ENV);
}

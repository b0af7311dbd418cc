//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Environment variable holding the comma-separated CORS allow-list.
pub const ALLOWED_ORIGINS_ENV: &str = "ALLOWED_ORIGINS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, environment overlay, then
/// semantic validation.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(p) => toml::from_str(&fs::read_to_string(p)?)?,
        None => ProxyConfig::default(),
    };

    apply_env(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay process environment variables onto a configuration.
pub fn apply_env(config: &mut ProxyConfig) {
    apply_env_with(config, |key| std::env::var(key).ok());
}

/// Overlay environment values supplied by `lookup`.
///
/// Values present in the environment take precedence over the config file.
pub fn apply_env_with(config: &mut ProxyConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup(API_KEY_ENV) {
        config.upstream.api_key = key;
    }
    if let Some(origins) = lookup(ALLOWED_ORIGINS_ENV) {
        config.cors.allowed_origins = Some(origins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_env_overlay_takes_precedence() {
        let mut config = ProxyConfig::default();
        config.upstream.api_key = "from-file".into();

        apply_env_with(&mut config, |key| match key {
            API_KEY_ENV => Some("from-env".to_string()),
            ALLOWED_ORIGINS_ENV => Some("http://a,http://b".to_string()),
            _ => None,
        });

        assert_eq!(config.upstream.api_key, "from-env");
        assert_eq!(
            config.cors.allowed_origins.as_deref(),
            Some("http://a,http://b")
        );
    }

    #[test]
    fn test_absent_env_leaves_config_untouched() {
        let mut config = ProxyConfig::default();
        config.upstream.api_key = "from-file".into();
        config.cors.allowed_origins = Some("http://a".into());

        apply_env_with(&mut config, |_| None);

        assert_eq!(config.upstream.api_key, "from-file");
        assert_eq!(config.cors.allowed_origins.as_deref(), Some("http://a"));
    }
}

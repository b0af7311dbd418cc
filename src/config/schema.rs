//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the weather proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream forecast API settings.
    pub upstream: UpstreamConfig,

    /// CORS allow-list settings.
    pub cors: CorsConfig,

    /// Reply cache settings.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream forecast API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the forecast endpoint.
    pub base_url: String,

    /// Query parameter name the upstream expects the credential under.
    pub credential_param: String,

    /// Secret API key. Usually supplied via the `OPENWEATHER_API_KEY`
    /// environment variable rather than the config file. Empty means
    /// unconfigured; requests are then rejected with a 500.
    pub api_key: String,

    /// Default for the `units` query parameter when the client omits it.
    pub default_units: String,

    /// Default for the `lang` query parameter when the client omits it.
    pub default_lang: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5/forecast".to_string(),
            credential_param: "appid".to_string(),
            api_key: String::new(),
            default_units: "metric".to_string(),
            default_lang: "kr".to_string(),
        }
    }
}

/// CORS allow-list configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins; may contain `*`.
    /// Absent means every origin is allowed.
    pub allowed_origins: Option<String>,
}

/// Reply cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the upstream reply cache.
    pub enabled: bool,

    /// Time-to-live for cached replies in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Bounds the whole invocation; the upstream call itself sets no
    /// timeout of its own.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(
            config.upstream.base_url,
            "https://api.openweathermap.org/data/2.5/forecast"
        );
        assert_eq!(config.upstream.credential_param, "appid");
        assert!(config.upstream.api_key.is_empty());
        assert_eq!(config.upstream.default_units, "metric");
        assert_eq!(config.upstream.default_lang, "kr");
        assert!(config.cors.allowed_origins.is_none());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [cors]
            allowed_origins = "http://a,http://b"

            [cache]
            ttl_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(
            config.cors.allowed_origins.as_deref(),
            Some("http://a,http://b")
        );
        assert_eq!(config.cache.ttl_secs, 60);
        // Untouched sections fall back to defaults
        assert!(config.cache.enabled);
        assert_eq!(config.upstream.default_units, "metric");
    }
}

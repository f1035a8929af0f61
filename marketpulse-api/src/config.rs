//! API Server Configuration
//!
//! Server-level settings (bind address, CORS, upstream credentials), loaded
//! from environment variables with development defaults. Read once at startup
//! and never mutated afterwards.

use std::time::Duration;

/// Server configuration for the MarketPulse API.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host for the HTTP listener.
    pub bind_host: String,

    /// Bind port for the HTTP listener.
    pub port: u16,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// NewsAPI credential. Absence makes headline endpoints fail with a
    /// service-unavailable error rather than at startup.
    pub news_api_key: Option<String>,

    /// TTL for cached headline lookups.
    pub news_cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 8051,
            cors_origins: Vec::new(), // Empty = allow all
            news_api_key: None,
            news_cache_ttl: Duration::from_secs(15 * 60),
        }
    }
}

impl ServerConfig {
    /// Create ServerConfig from environment variables.
    ///
    /// Environment variables:
    /// - `MARKETPULSE_BIND`: bind host (default: "0.0.0.0")
    /// - `PORT`: bind port (default: 8051)
    /// - `MARKETPULSE_CORS_ORIGINS`: comma-separated origins (empty = allow all)
    /// - `NEWS_API_KEY`: NewsAPI credential
    /// - `NEWS_CACHE_TTL_SECS`: headline cache TTL (default: 900)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_host = std::env::var("MARKETPULSE_BIND").unwrap_or(defaults.bind_host);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let cors_origins = std::env::var("MARKETPULSE_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let news_api_key = std::env::var("NEWS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let news_cache_ttl = std::env::var("NEWS_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.news_cache_ttl);

        Self {
            bind_host,
            port,
            cors_origins,
            news_api_key,
            news_cache_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_host, "0.0.0.0");
        assert_eq!(config.port, 8051);
        assert!(config.cors_origins.is_empty());
        assert!(config.news_api_key.is_none());
        assert_eq!(config.news_cache_ttl, Duration::from_secs(900));
    }
}

//! Sentiment pipeline configuration.
//!
//! Loaded once at process start from environment variables and treated as
//! read-only for the process lifetime. The enabled flags fix the provider
//! priority order for every request; no per-request branching on env state.

use std::time::Duration;

use crate::cache::{DEFAULT_MAX_SIZE, DEFAULT_TTL};

/// Configuration for the sentiment pipeline and its provider adapters.
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// Whether the Gemma (cloud) adapter is enabled. First in priority order.
    pub use_gemma: bool,

    /// Whether the Ollama (local inference) adapter is enabled. Tried after
    /// Gemma; the local classifier always terminates the chain.
    pub use_ollama: bool,

    /// API key for the Gemini endpoint. Absence makes the Gemma stage fail
    /// with a credential error before any network call.
    pub gemini_api_key: Option<String>,

    /// Gemma model name.
    pub gemma_model: String,

    /// Ollama server base URL.
    pub ollama_base_url: String,

    /// Ollama model name.
    pub ollama_model: String,

    /// Upper bound on a single provider attempt. Slow local inference makes
    /// this large; it still must be bounded.
    pub provider_timeout: Duration,

    /// TTL for cached sentiment results.
    pub cache_ttl: Duration,

    /// Maximum number of cached sentiment results.
    pub cache_max_size: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            use_gemma: false,
            use_ollama: true,
            gemini_api_key: None,
            gemma_model: "gemini-2.0-flash".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "gpt-oss:20b".to_string(),
            provider_timeout: Duration::from_secs(120),
            cache_ttl: DEFAULT_TTL,
            cache_max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl SentimentConfig {
    /// Create SentimentConfig from environment variables.
    ///
    /// Environment variables:
    /// - `USE_GEMMA`: "true" or "false" (default: false)
    /// - `USE_OLLAMA`: "true" or "false" (default: true)
    /// - `GEMINI_API_KEY`: credential for the Gemma stage
    /// - `GEMMA_MODEL`: model name (default: "gemini-2.0-flash")
    /// - `OLLAMA_BASE_URL`: server URL (default: "http://localhost:11434")
    /// - `OLLAMA_MODEL`: model name (default: "gpt-oss:20b")
    /// - `SENTIMENT_TIMEOUT_SECS`: per-provider timeout (default: 120)
    /// - `SENTIMENT_CACHE_TTL_SECS`: cache TTL (default: 900)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let use_gemma = env_bool("USE_GEMMA", defaults.use_gemma);
        let use_ollama = env_bool("USE_OLLAMA", defaults.use_ollama);

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let gemma_model =
            std::env::var("GEMMA_MODEL").unwrap_or(defaults.gemma_model);
        let ollama_base_url = std::env::var("OLLAMA_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.ollama_base_url);
        let ollama_model =
            std::env::var("OLLAMA_MODEL").unwrap_or(defaults.ollama_model);

        let provider_timeout = std::env::var("SENTIMENT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.provider_timeout);

        let cache_ttl = std::env::var("SENTIMENT_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        Self {
            use_gemma,
            use_ollama,
            gemini_api_key,
            gemma_model,
            ollama_base_url,
            ollama_model,
            provider_timeout,
            cache_ttl,
            cache_max_size: defaults.cache_max_size,
        }
    }

    /// Configuration with every remote provider disabled; the pipeline then
    /// answers exclusively from the local classifier.
    pub fn offline() -> Self {
        Self {
            use_gemma: false,
            use_ollama: false,
            ..Self::default()
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_lowercase() == "true")
        .unwrap_or(default)
}

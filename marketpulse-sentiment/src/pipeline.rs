//! Fallback orchestrator for sentiment classification.
//!
//! Tries the enabled provider adapters in priority order (gemma, then
//! ollama) and degrades to the local classifier when every adapter fails.
//! One earlier revision of this service tried gemma OR ollama exclusively;
//! the full chain implemented here supersedes that.

use marketpulse_core::{SentimentError, SentimentResult};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::SentimentConfig;
use crate::local::LocalClassifier;
use crate::providers::{GemmaProvider, OllamaProvider};
use crate::SentimentProvider;

/// The sentiment resolution pipeline.
///
/// The provider list is built once at startup from configuration and never
/// changes; request handling iterates it without re-reading the environment.
/// `analyze` is infallible: the local classifier terminates every chain.
pub struct SentimentPipeline {
    providers: Vec<Arc<dyn SentimentProvider>>,
    classifier: LocalClassifier,
    cache: TtlCache<SentimentResult>,
    attempt_timeout: Duration,
}

impl SentimentPipeline {
    /// Build the pipeline from configuration, with the system clock.
    pub fn from_config(config: &SentimentConfig) -> Self {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    /// Build the pipeline from configuration with an injected clock, so tests
    /// can drive cache expiry deterministically.
    pub fn from_config_with_clock(config: &SentimentConfig, clock: Arc<dyn Clock>) -> Self {
        let mut providers: Vec<Arc<dyn SentimentProvider>> = Vec::new();

        if config.use_gemma {
            providers.push(Arc::new(GemmaProvider::new(
                config.gemini_api_key.clone(),
                config.gemma_model.clone(),
                config.provider_timeout,
            )));
        }
        if config.use_ollama {
            providers.push(Arc::new(OllamaProvider::new(
                config.ollama_base_url.clone(),
                config.ollama_model.clone(),
                config.provider_timeout,
            )));
        }

        Self {
            providers,
            classifier: LocalClassifier::new(),
            cache: TtlCache::with_settings(config.cache_ttl, config.cache_max_size, clock),
            attempt_timeout: config.provider_timeout,
        }
    }

    /// Build a pipeline over an explicit provider list and cache. Used by
    /// tests to substitute scripted providers.
    pub fn with_providers(
        providers: Vec<Arc<dyn SentimentProvider>>,
        cache: TtlCache<SentimentResult>,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            classifier: LocalClassifier::new(),
            cache,
            attempt_timeout,
        }
    }

    /// Names of the configured providers, in attempt order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Classify a text. Never fails; the `model` field of the result reports
    /// which stage actually answered.
    ///
    /// Cache, then each provider once in order under a bounded timeout, then
    /// the local classifier. Provider failures are logged and recovered here;
    /// they never reach the caller.
    pub async fn analyze(&self, text: &str) -> SentimentResult {
        let key = cache_key(text);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(model = %cached.model, "Sentiment cache hit");
            return cached;
        }

        for provider in &self.providers {
            let name = provider.name();
            tracing::info!(provider = name, "Attempting sentiment provider");

            let attempt = tokio::time::timeout(self.attempt_timeout, provider.classify(text));
            match attempt.await {
                Ok(Ok(result)) => {
                    tracing::info!(
                        provider = name,
                        sentiment = %result.sentiment,
                        "Sentiment provider succeeded"
                    );
                    self.cache.insert(key, result.clone());
                    return result;
                }
                Ok(Err(error)) => {
                    tracing::warn!(provider = name, %error, "Sentiment provider failed");
                }
                Err(_) => {
                    let error = SentimentError::Timeout {
                        provider: name.to_string(),
                        timeout_ms: self.attempt_timeout.as_millis() as u64,
                    };
                    tracing::warn!(provider = name, %error, "Sentiment provider timed out");
                }
            }
        }

        let result = self.classifier.classify(text);
        tracing::info!(sentiment = %result.sentiment, "Falling back to local classifier");
        self.cache.insert(key, result.clone());
        result
    }
}

impl std::fmt::Debug for SentimentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentPipeline")
            .field("providers", &self.provider_names())
            .field("attempt_timeout", &self.attempt_timeout)
            .field("cache", &self.cache)
            .finish()
    }
}

/// Cache key: SHA-256 of the whitespace-normalized, lower-cased text, so
/// trivially reformatted duplicates share an entry.
fn cache_key(text: &str) -> String {
    let normalized = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = hasher.finalize();
    format!("{:x}", digest)
}

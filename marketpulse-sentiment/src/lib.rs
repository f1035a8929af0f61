//! MarketPulse Sentiment - multi-provider sentiment resolution
//!
//! This crate defines the provider trait for remote sentiment backends, the
//! deterministic local classifier, and the fallback pipeline that ties them
//! together with a TTL cache.
//!
//! Control flow per request: cache check, then each enabled provider in
//! priority order (gemma, then ollama), then the local classifier as the
//! terminal fallback. The pipeline never returns an error to the caller.

use async_trait::async_trait;
use marketpulse_core::{SentimentError, SentimentResult};

pub mod cache;
pub mod config;
pub mod local;
pub mod pipeline;
pub mod providers;

pub use cache::{Clock, SystemClock, TtlCache};
pub use config::SentimentConfig;
pub use local::LocalClassifier;
pub use pipeline::SentimentPipeline;
pub use providers::{GemmaProvider, OllamaProvider};

/// Trait for remote sentiment inference backends.
/// Implementations must be thread-safe (Send + Sync).
///
/// An adapter translates one provider's protocol and response format into the
/// shared [`SentimentResult`] shape, or a [`SentimentError`] the pipeline can
/// recover from. Adapters never panic on provider misbehavior.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Classify a single text.
    ///
    /// # Returns
    /// * `Ok(SentimentResult)` - Normalized result with this provider's model tag
    /// * `Err(SentimentError)` - Any failure; the caller advances the fallback chain
    async fn classify(&self, text: &str) -> Result<SentimentResult, SentimentError>;

    /// Stable provider identifier used in logs and `model` tags.
    fn name(&self) -> &str;
}

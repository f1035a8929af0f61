//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use marketpulse_sentiment::{OllamaProvider, SentimentConfig, SentimentPipeline};

use crate::clients::{MarketClient, NewsClient};
use crate::config::ServerConfig;

/// Application-wide state shared across all routes.
///
/// Everything here is built once at startup from configuration and is
/// read-only afterwards; the caches inside the pipeline and news client
/// handle their own synchronization.
#[derive(Clone)]
pub struct AppState {
    /// Sentiment resolution pipeline (cache + fallback chain).
    pub sentiment: Arc<SentimentPipeline>,
    /// Headline provider client with its own TTL cache.
    pub news: Arc<NewsClient>,
    /// Price/history provider client.
    pub market: Arc<MarketClient>,
    /// Ollama handle used only for health probing, independent of whether
    /// the adapter is enabled in the pipeline.
    pub ollama_probe: Arc<OllamaProvider>,
    pub start_time: Instant,
}

impl AppState {
    /// Assemble the full application state from configuration.
    pub fn new(server_config: &ServerConfig, sentiment_config: &SentimentConfig) -> Self {
        let clock = Arc::new(marketpulse_sentiment::SystemClock);

        Self {
            sentiment: Arc::new(SentimentPipeline::from_config(sentiment_config)),
            news: Arc::new(NewsClient::new(
                server_config.news_api_key.clone(),
                server_config.news_cache_ttl,
                clock,
            )),
            market: Arc::new(MarketClient::new()),
            ollama_probe: Arc::new(OllamaProvider::new(
                sentiment_config.ollama_base_url.clone(),
                sentiment_config.ollama_model.clone(),
                sentiment_config.provider_timeout,
            )),
            start_time: Instant::now(),
        }
    }
}

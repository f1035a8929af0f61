//! Headline provider client (NewsAPI).

use chrono::{DateTime, Utc};
use marketpulse_core::{Headline, HeadlinesResponse, NewsError};
use marketpulse_sentiment::{Clock, TtlCache};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Headlines returned per lookup; also the batch size fed to sentiment.
pub const MAX_HEADLINES: usize = 5;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct ArticlesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Clone, Deserialize)]
struct Article {
    title: Option<String>,
    source: Option<ArticleSource>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// NewsAPI client with a TTL cache keyed by `market:query`.
pub struct NewsClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    cache: TtlCache<Vec<Headline>>,
}

impl NewsClient {
    /// Create a news client.
    ///
    /// # Arguments
    /// * `api_key` - NewsAPI key; `None` makes lookups fail without network I/O
    /// * `cache_ttl` - How long a headline batch stays fresh
    /// * `clock` - Time source for the cache
    pub fn new(api_key: Option<String>, cache_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache: TtlCache::with_settings(cache_ttl, 256, clock),
        }
    }

    /// Override the endpoint base URL (used by tests against a stub server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether a credential is configured, for health reporting.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch the latest headlines for a market, optionally narrowed to a
    /// company query. Served from cache within the TTL window.
    ///
    /// * `market` - "indian", "us", or anything else for global coverage
    /// * `query` - optional company name (e.g., "RELIANCE", "TCS")
    pub async fn get_headlines(
        &self,
        market: &str,
        query: Option<&str>,
    ) -> Result<HeadlinesResponse, NewsError> {
        let cache_key = format!(
            "{}:{}",
            market.to_lowercase(),
            query.unwrap_or("general").to_lowercase()
        );
        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!(key = %cache_key, "Headline cache hit");
            return Ok(HeadlinesResponse { headlines: cached });
        }

        let api_key = self.api_key.as_deref().ok_or(NewsError::MissingApiKey)?;

        let url = self.build_url(market, query);
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed {
                status: 0,
                message: format!("HTTP request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NewsError::RequestFailed {
                status: status.as_u16() as i32,
                message,
            });
        }

        let body: ArticlesResponse =
            response
                .json()
                .await
                .map_err(|e| NewsError::InvalidResponse {
                    reason: format!("Failed to parse articles: {}", e),
                })?;

        let headlines: Vec<Headline> = body
            .articles
            .into_iter()
            .take(MAX_HEADLINES)
            .map(|article| Headline {
                title: article.title.unwrap_or_else(|| "No title".to_string()),
                source: article.source.and_then(|source| source.name),
                url: article.url,
                published: article.published_at,
            })
            .collect();

        self.cache.insert(cache_key, headlines.clone());
        Ok(HeadlinesResponse { headlines })
    }

    /// Select the NewsAPI endpoint: company queries use /everything, market
    /// lookups use /top-headlines with a country filter where one exists.
    fn build_url(&self, market: &str, query: Option<&str>) -> String {
        let country_code = match market.to_lowercase().as_str() {
            "indian" | "in" => Some("in"),
            "us" => Some("us"),
            _ => None,
        };

        match (query, country_code) {
            (Some(q), _) => format!(
                "{}/everything?q={}&language=en&sortBy=publishedAt",
                self.base_url,
                urlencode(q)
            ),
            (None, Some(country)) => format!(
                "{}/top-headlines?country={}&language=en",
                self.base_url, country
            ),
            (None, None) => format!("{}/top-headlines?language=en", self.base_url),
        }
    }
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("cache", &self.cache)
            .finish()
    }
}

/// Minimal percent-encoding for the query component.
fn urlencode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

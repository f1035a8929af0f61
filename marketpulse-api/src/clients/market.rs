//! Price/history provider client (Yahoo chart endpoint).
//!
//! External collaborator: nothing in the sentiment core depends on this.

use chrono::{DateTime, Utc};
use marketpulse_core::{HistoryPoint, HistoryResponse, MarketError, PriceResponse};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Periods accepted by the chart endpoint.
pub const VALID_PERIODS: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Vec<ChartResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "regularMarketTime")]
    regular_market_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Clone, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// Chart-endpoint client for latest price and closing-price history.
pub struct MarketClient {
    client: Client,
    base_url: String,
}

impl MarketClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint base URL (used by tests against a stub server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Latest price for a ticker. A symbol with no data yields a `None`
    /// price stamped with the current time, not an error.
    pub async fn get_price(&self, ticker: &str) -> Result<PriceResponse, MarketError> {
        let result = self.fetch_chart(ticker, "1d").await?;

        let Some(chart) = result else {
            return Ok(PriceResponse {
                ticker: ticker.to_string(),
                price: None,
                time: Utc::now(),
            });
        };

        let time = chart
            .meta
            .regular_market_time
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        Ok(PriceResponse {
            ticker: ticker.to_string(),
            price: chart.meta.regular_market_price.map(round2),
            time,
        })
    }

    /// Closing-price history over a period (e.g., "1mo").
    pub async fn get_history(
        &self,
        ticker: &str,
        period: &str,
    ) -> Result<HistoryResponse, MarketError> {
        let result = self.fetch_chart(ticker, period).await?;

        let history = match result {
            Some(chart) => {
                let closes = chart
                    .indicators
                    .quote
                    .into_iter()
                    .next()
                    .map(|quote| quote.close)
                    .unwrap_or_default();

                chart
                    .timestamp
                    .iter()
                    .zip(closes)
                    .filter_map(|(ts, close)| {
                        let close = close?;
                        let date = DateTime::from_timestamp(*ts, 0)?;
                        Some(HistoryPoint {
                            date: date.format("%Y-%m-%d").to_string(),
                            price: round2(close),
                        })
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(HistoryResponse {
            ticker: ticker.to_string(),
            history,
        })
    }

    async fn fetch_chart(
        &self,
        ticker: &str,
        range: &str,
    ) -> Result<Option<ChartResult>, MarketError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, ticker, range
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| MarketError::RequestFailed {
                ticker: ticker.to_string(),
                status: 0,
                message: format!("HTTP request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MarketError::RequestFailed {
                ticker: ticker.to_string(),
                status: status.as_u16() as i32,
                message,
            });
        }

        let body: ChartResponse =
            response
                .json()
                .await
                .map_err(|e| MarketError::InvalidResponse {
                    ticker: ticker.to_string(),
                    reason: format!("Failed to parse chart: {}", e),
                })?;

        Ok(body.chart.result.into_iter().next())
    }
}

impl Default for MarketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MarketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(24312.4567), 24312.46);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_valid_periods_cover_defaults() {
        assert!(VALID_PERIODS.contains(&"1mo"));
        assert!(VALID_PERIODS.contains(&"1d"));
        assert!(!VALID_PERIODS.contains(&"2mo"));
    }

    #[test]
    fn test_chart_parsing() {
        let body = r#"{
            "chart": {
                "result": [{
                    "meta": {"regularMarketPrice": 193.4212, "regularMarketTime": 1724630400},
                    "timestamp": [1724544000, 1724630400],
                    "indicators": {"quote": [{"close": [192.11, null]}]}
                }]
            }
        }"#;
        let parsed: ChartResponse = serde_json::from_str(body).unwrap();
        let result = parsed.chart.result.into_iter().next().unwrap();
        assert_eq!(result.meta.regular_market_price, Some(193.4212));
        assert_eq!(result.timestamp.len(), 2);
        assert_eq!(result.indicators.quote[0].close[1], None);
    }

    #[test]
    fn test_chart_parsing_empty_result() {
        let body = r#"{"chart": {"result": []}}"#;
        let parsed: ChartResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.chart.result.is_empty());
    }
}

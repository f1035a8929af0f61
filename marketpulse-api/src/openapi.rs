//! OpenAPI document for the MarketPulse API.
//!
//! Generated with utoipa from route annotations and the shared wire types;
//! served at `/openapi.json`.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{data, headlines, health, market, sentiment};

use marketpulse_core::{
    Headline, HeadlinesResponse, HistoryPoint, HistoryResponse, PriceResponse, SentimentLabel,
    SentimentResult,
};

/// OpenAPI document for the MarketPulse API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MarketPulse API",
        version = "0.3.0",
        description = "Market dashboard backend: prices, headlines, and multi-provider sentiment with fallback",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8051", description = "Local Development")
    ),
    tags(
        (name = "Sentiment", description = "Text classification through the provider fallback chain"),
        (name = "Headlines", description = "Market and company news headlines"),
        (name = "Market", description = "Prices and closing-price history"),
        (name = "Data", description = "Combined dashboard payload"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        sentiment::analyze_sentiment,
        headlines::get_headlines,
        market::get_price,
        market::get_history,
        data::get_data,
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        SentimentLabel,
        SentimentResult,
        Headline,
        HeadlinesResponse,
        PriceResponse,
        HistoryPoint,
        HistoryResponse,
        data::ScoredHeadline,
        data::SentimentAggregates,
        data::DataMeta,
        data::DataResponse,
        health::HealthResponse,
        health::HealthStatus,
        health::HealthDetails,
        health::ComponentHealth,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_doc_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/sentiment"));
        assert!(json.contains("/data"));
        assert!(json.contains("/health/ready"));
    }

    #[test]
    fn test_openapi_has_schemas() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.schemas.contains_key("SentimentResult"));
        assert!(components.schemas.contains_key("Headline"));
    }
}

//! MarketPulse API - HTTP layer for the market dashboard backend.
//!
//! Exposes REST endpoints (Axum) for sentiment classification, market
//! headlines, prices, price history, a combined dashboard payload, and
//! health probes. Sentiment resolution is delegated to the fallback
//! pipeline in marketpulse-sentiment.

pub mod clients;
pub mod config;
pub mod error;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use clients::{MarketClient, NewsClient};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;

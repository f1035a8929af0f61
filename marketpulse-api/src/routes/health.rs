//! Health Check Endpoints
//!
//! - /health/ping - Simple liveness check
//! - /health/live - Process alive check
//! - /health/ready - Per-collaborator readiness report
//!
//! Readiness never fails the process: a down collaborator degrades the
//! report, mirroring how the sentiment pipeline degrades instead of erroring.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use marketpulse_sentiment::LocalClassifier;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::state::AppState;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthDetails {
    /// NewsAPI credential present.
    pub news: ComponentHealth,
    /// Market chart endpoint reachable.
    pub market: ComponentHealth,
    /// Ollama server reachable.
    pub ollama: ComponentHealth,
    /// Local classifier sanity check.
    pub sentiment: ComponentHealth,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ComponentHealth {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    fn ok(latency_ms: Option<u64>) -> Self {
        Self {
            ok: true,
            latency_ms,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            latency_ms: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health/ping - Simple pong response
#[utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses(
        (status = 200, description = "Service is responding", body = String),
    ),
)]
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}

/// GET /health/live - Process liveness check
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse),
    ),
)]
pub async fn liveness() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        message: Some("Process is alive".to_string()),
        details: None,
    };
    (StatusCode::OK, Json(response))
}

/// GET /health/ready - Readiness report over upstream collaborators
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Healthy or degraded but serving", body = HealthResponse),
        (status = 503, description = "Local classifier broken", body = HealthResponse),
    ),
)]
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let news = if state.news.is_configured() {
        ComponentHealth::ok(None)
    } else {
        ComponentHealth::failed("NEWS_API_KEY not configured")
    };

    let market_start = Instant::now();
    let market = match state.market.get_price("AAPL").await {
        Ok(_) => ComponentHealth::ok(Some(market_start.elapsed().as_millis() as u64)),
        Err(e) => ComponentHealth::failed(e.to_string()),
    };

    let ollama_start = Instant::now();
    let ollama = if state.ollama_probe.check_available().await {
        ComponentHealth::ok(Some(ollama_start.elapsed().as_millis() as u64))
    } else {
        ComponentHealth::failed("Ollama server not reachable")
    };

    // The terminal fallback must always classify; anything else is a bug.
    let probe = LocalClassifier::new().classify("health probe");
    let sentiment = if probe.sentiment.is_classified() {
        ComponentHealth::ok(None)
    } else {
        ComponentHealth::failed(format!("local classifier returned {}", probe.sentiment))
    };

    let all_ok = [&news, &market, &ollama, &sentiment]
        .iter()
        .all(|component| component.ok);
    let status = if all_ok {
        HealthStatus::Healthy
    } else if sentiment.ok {
        // Sentiment still answers via the local classifier.
        HealthStatus::Degraded
    } else {
        HealthStatus::Unhealthy
    };

    let response = HealthResponse {
        status,
        message: None,
        details: Some(HealthDetails {
            news,
            market,
            ollama,
            sentiment,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
        }),
    };

    // Degraded still serves requests; only a broken classifier is fatal.
    let status_code = if status == HealthStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (status_code, Json(response))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create health check router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

//! Price and history endpoints.

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use marketpulse_core::{HistoryResponse, PriceResponse};
use serde::Deserialize;

use crate::clients::market::VALID_PERIODS;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct PriceQuery {
    /// Ticker symbol (e.g., "AAPL", "^NSEI").
    pub ticker: Option<String>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct HistoryQuery {
    pub ticker: Option<String>,
    /// Chart period (default "1mo").
    pub period: Option<String>,
}

fn require_ticker(ticker: Option<&str>) -> ApiResult<&str> {
    ticker
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::missing_parameter("ticker"))
}

pub(crate) fn validate_period(period: Option<&str>) -> ApiResult<&str> {
    let period = period.unwrap_or("1mo");
    if VALID_PERIODS.contains(&period) {
        Ok(period)
    } else {
        Err(ApiError::invalid_input(format!(
            "Invalid period '{}', expected one of {:?}",
            period, VALID_PERIODS
        )))
    }
}

/// GET /price - latest price for a ticker.
#[utoipa::path(
    get,
    path = "/price",
    tag = "Market",
    params(PriceQuery),
    responses(
        (status = 200, description = "Latest price", body = PriceResponse),
        (status = 400, description = "Missing ticker", body = crate::error::ApiError),
        (status = 502, description = "Market provider failed", body = crate::error::ApiError),
    ),
)]
pub async fn get_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> ApiResult<Json<PriceResponse>> {
    let ticker = require_ticker(query.ticker.as_deref())?;
    Ok(Json(state.market.get_price(ticker).await?))
}

/// GET /history - closing-price history for a ticker over a period.
#[utoipa::path(
    get,
    path = "/history",
    tag = "Market",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Price history", body = HistoryResponse),
        (status = 400, description = "Missing ticker or invalid period", body = crate::error::ApiError),
        (status = 502, description = "Market provider failed", body = crate::error::ApiError),
    ),
)]
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let ticker = require_ticker(query.ticker.as_deref())?;
    let period = validate_period(query.period.as_deref())?;
    Ok(Json(state.market.get_history(ticker, period).await?))
}

/// Create market router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/price", get(get_price))
        .route("/history", get(get_history))
}

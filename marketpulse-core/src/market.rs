//! Market data types (price and history).
//!
//! The price/history providers are external collaborators; these are just the
//! shapes the API layer returns for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest price for a ticker. `price` is None when the upstream returned no
/// data for the symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PriceResponse {
    pub ticker: String,
    pub price: Option<f64>,
    pub time: DateTime<Utc>,
}

/// One closing price on one trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HistoryPoint {
    /// Trading date, `YYYY-MM-DD`.
    pub date: String,
    pub price: f64,
}

/// Closing-price history for a ticker over a requested period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HistoryResponse {
    pub ticker: String,
    pub history: Vec<HistoryPoint>,
}

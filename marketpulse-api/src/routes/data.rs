//! Combined dashboard endpoint: price, history, headlines, and sentiment
//! in one payload.

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use marketpulse_core::{Headline, HistoryPoint, SentimentLabel, SentimentResult};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::routes::market::validate_period;
use crate::state::AppState;

/// Normalized-score threshold above which the headline mix reads as a
/// positive signal (negated for the negative side).
const SIGNAL_THRESHOLD: f64 = 0.2;

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct DataQuery {
    pub ticker: Option<String>,
    /// Chart period (default "1mo").
    pub period: Option<String>,
    /// Market selector for headlines (default "indian").
    pub market: Option<String>,
}

/// One headline with the sentiment assigned to its title.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScoredHeadline {
    #[serde(flatten)]
    pub headline: Headline,
    pub sentiment: SentimentLabel,
    pub confidence: f32,
}

/// Label counts and a normalized score over the scored headlines.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SentimentAggregates {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// positive count minus negative count.
    pub raw_score: i64,
    /// raw_score / total scored headlines, in [-1, 1].
    pub norm_score: f64,
    /// "positive" / "negative" / "neutral" derived from norm_score.
    pub signal: SentimentLabel,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DataMeta {
    pub model_used: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DataResponse {
    pub ticker: String,
    pub price: Option<f64>,
    pub time: DateTime<Utc>,
    pub history: Vec<HistoryPoint>,
    /// Sentiment over the joined top-5 headline titles.
    pub sentiment: SentimentResult,
    pub headlines: Vec<ScoredHeadline>,
    pub aggregates: SentimentAggregates,
    pub meta: DataMeta,
}

/// GET /data - combined price, history, headlines, and sentiment payload.
///
/// A news failure degrades to an empty headline list rather than failing the
/// whole request; price and history errors still surface as upstream errors.
#[utoipa::path(
    get,
    path = "/data",
    tag = "Data",
    params(DataQuery),
    responses(
        (status = 200, description = "Combined dashboard payload", body = DataResponse),
        (status = 400, description = "Missing ticker or invalid period", body = crate::error::ApiError),
        (status = 502, description = "Market provider failed", body = crate::error::ApiError),
    ),
)]
pub async fn get_data(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> ApiResult<Json<DataResponse>> {
    let ticker = query
        .ticker
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::missing_parameter("ticker"))?;
    let period = validate_period(query.period.as_deref())?;
    let market = query.market.as_deref().unwrap_or("indian");

    let price = state.market.get_price(ticker).await?;
    let history = state.market.get_history(ticker, period).await?;

    let headlines = match state.news.get_headlines(market, None).await {
        Ok(response) => response.headlines,
        Err(e) => {
            tracing::warn!(error = %e, market, "headline fetch failed, continuing without news");
            Vec::new()
        }
    };

    let combined_text = headlines
        .iter()
        .take(5)
        .map(|h| h.title.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let sentiment = if combined_text.is_empty() {
        SentimentResult::new("", SentimentLabel::Neutral, 0.0, "none")
    } else {
        state.sentiment.analyze(&combined_text).await
    };

    let mut scored = Vec::with_capacity(headlines.len());
    for headline in headlines {
        let result = state.sentiment.analyze(&headline.title).await;
        scored.push(ScoredHeadline {
            headline,
            sentiment: result.sentiment,
            confidence: result.confidence,
        });
    }
    let aggregates = aggregate(&scored);

    Ok(Json(DataResponse {
        ticker: ticker.to_string(),
        price: price.price,
        time: price.time,
        history: history.history,
        meta: DataMeta {
            model_used: sentiment.model.clone(),
            updated_at: Utc::now(),
        },
        sentiment,
        headlines: scored,
        aggregates,
    }))
}

fn aggregate(scored: &[ScoredHeadline]) -> SentimentAggregates {
    let positive = scored
        .iter()
        .filter(|s| s.sentiment == SentimentLabel::Positive)
        .count();
    let negative = scored
        .iter()
        .filter(|s| s.sentiment == SentimentLabel::Negative)
        .count();
    let neutral = scored
        .iter()
        .filter(|s| s.sentiment == SentimentLabel::Neutral)
        .count();

    let raw_score = positive as i64 - negative as i64;
    let total = (positive + negative + neutral).max(1);
    let norm_score = raw_score as f64 / total as f64;

    let signal = if norm_score >= SIGNAL_THRESHOLD {
        SentimentLabel::Positive
    } else if norm_score <= -SIGNAL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    SentimentAggregates {
        positive,
        negative,
        neutral,
        raw_score,
        norm_score: (norm_score * 10_000.0).round() / 10_000.0,
        signal,
    }
}

/// Create data router.
pub fn create_router() -> Router<AppState> {
    Router::new().route("/data", get(get_data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(label: SentimentLabel) -> ScoredHeadline {
        ScoredHeadline {
            headline: Headline {
                title: "headline".to_string(),
                source: None,
                url: None,
                published: None,
            },
            sentiment: label,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_aggregate_empty() {
        let agg = aggregate(&[]);
        assert_eq!(agg.positive, 0);
        assert_eq!(agg.raw_score, 0);
        assert_eq!(agg.norm_score, 0.0);
        assert_eq!(agg.signal, SentimentLabel::Neutral);
    }

    #[test]
    fn test_aggregate_positive_signal() {
        let agg = aggregate(&[
            scored(SentimentLabel::Positive),
            scored(SentimentLabel::Positive),
            scored(SentimentLabel::Negative),
            scored(SentimentLabel::Neutral),
        ]);
        assert_eq!(agg.positive, 2);
        assert_eq!(agg.negative, 1);
        assert_eq!(agg.neutral, 1);
        assert_eq!(agg.raw_score, 1);
        assert_eq!(agg.norm_score, 0.25);
        assert_eq!(agg.signal, SentimentLabel::Positive);
    }

    #[test]
    fn test_aggregate_balanced_is_neutral() {
        let agg = aggregate(&[
            scored(SentimentLabel::Positive),
            scored(SentimentLabel::Negative),
        ]);
        assert_eq!(agg.raw_score, 0);
        assert_eq!(agg.signal, SentimentLabel::Neutral);
    }

    #[test]
    fn test_aggregate_negative_threshold_inclusive() {
        // norm_score of exactly -0.2 counts as a negative signal.
        let agg = aggregate(&[
            scored(SentimentLabel::Negative),
            scored(SentimentLabel::Neutral),
            scored(SentimentLabel::Neutral),
            scored(SentimentLabel::Neutral),
            scored(SentimentLabel::Neutral),
        ]);
        assert_eq!(agg.norm_score, -0.2);
        assert_eq!(agg.signal, SentimentLabel::Negative);
    }
}

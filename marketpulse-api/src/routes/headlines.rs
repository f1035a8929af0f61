//! Headline lookup endpoint.

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use marketpulse_core::HeadlinesResponse;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct HeadlinesQuery {
    /// Market selector: "indian", "us", or anything else for global.
    pub market: Option<String>,
    /// Optional company name (e.g., "RELIANCE", "TCS").
    pub query: Option<String>,
}

/// GET /headlines - latest headlines for a market or company.
///
/// Served from the TTL cache within the freshness window; a repeated lookup
/// does not hit the news provider again.
#[utoipa::path(
    get,
    path = "/headlines",
    tag = "Headlines",
    params(HeadlinesQuery),
    responses(
        (status = 200, description = "Latest headlines", body = HeadlinesResponse),
        (status = 502, description = "News provider failed", body = crate::error::ApiError),
        (status = 503, description = "News provider not configured", body = crate::error::ApiError),
    ),
)]
pub async fn get_headlines(
    State(state): State<AppState>,
    Query(query): Query<HeadlinesQuery>,
) -> ApiResult<Json<HeadlinesResponse>> {
    let market = query.market.as_deref().unwrap_or("indian");
    let response = state
        .news
        .get_headlines(market, query.query.as_deref())
        .await?;
    Ok(Json(response))
}

/// Create headlines router.
pub fn create_router() -> Router<AppState> {
    Router::new().route("/headlines", get(get_headlines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::error::{ApiError, ErrorCode};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use marketpulse_sentiment::SentimentConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_unconfigured_news_reports_service_unavailable() {
        // Default config has no NEWS_API_KEY, so the client fails fast.
        let state = AppState::new(&ServerConfig::default(), &SentimentConfig::offline());
        let response = create_router()
            .with_state(state)
            .oneshot(
                Request::builder()
                    .uri("/headlines?market=indian")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    }
}

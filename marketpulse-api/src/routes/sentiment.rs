//! Sentiment classification endpoint.

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use marketpulse_core::SentimentResult;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Minimum accepted input length, matching the dashboard's validation.
const MIN_TEXT_LEN: usize = 5;

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct SentimentQuery {
    /// Text to classify (at least 5 characters).
    pub text: String,
}

/// GET /sentiment - classify a text through the fallback pipeline.
///
/// Never returns a provider error: the pipeline degrades to the local
/// classifier, and the `model` field reports which stage answered.
#[utoipa::path(
    get,
    path = "/sentiment",
    tag = "Sentiment",
    params(SentimentQuery),
    responses(
        (status = 200, description = "Classification result", body = SentimentResult),
        (status = 400, description = "Text too short", body = crate::error::ApiError),
    ),
)]
pub async fn analyze_sentiment(
    State(state): State<AppState>,
    Query(query): Query<SentimentQuery>,
) -> ApiResult<Json<SentimentResult>> {
    let text = query.text.trim();
    if text.chars().count() < MIN_TEXT_LEN {
        return Err(ApiError::invalid_input(format!(
            "Parameter 'text' must be at least {} characters",
            MIN_TEXT_LEN
        )));
    }

    Ok(Json(state.sentiment.analyze(text).await))
}

/// Create sentiment router.
pub fn create_router() -> Router<AppState> {
    Router::new().route("/sentiment", get(analyze_sentiment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use marketpulse_core::SentimentLabel;
    use marketpulse_sentiment::SentimentConfig;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = AppState::new(&ServerConfig::default(), &SentimentConfig::offline());
        create_router().with_state(state)
    }

    #[tokio::test]
    async fn test_offline_classification_uses_local_model() {
        let uri = "/sentiment?text=Stocks%20rally%20as%20market%20hits%20record%20high";
        let response = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let result: SentimentResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.sentiment, SentimentLabel::Positive);
        assert_eq!(result.model, "local");
        assert_eq!(result.confidence, 0.70);
    }

    #[tokio::test]
    async fn test_short_text_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/sentiment?text=hey")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidInput);
    }
}

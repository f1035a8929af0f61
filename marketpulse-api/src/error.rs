//! Error Types for the MarketPulse API
//!
//! Defines the structured error response returned by every endpoint, the
//! error-code taxonomy, and the Axum IntoResponse integration. Errors are
//! serialized as JSON with the matching HTTP status code.
//!
//! Note: the sentiment endpoints never surface provider errors - the
//! pipeline recovers them internally - so no sentiment error codes exist.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marketpulse_core::{MarketError, NewsError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request contains invalid input data
    InvalidInput,

    /// Required query parameter is missing
    MissingParameter,

    /// Requested resource does not exist
    NotFound,

    /// An upstream data provider returned an error
    UpstreamFailed,

    /// Upstream call timed out
    Timeout,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput | ErrorCode::MissingParameter => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::UpstreamFailed => StatusCode::BAD_GATEWAY,
            ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a MissingParameter error.
    pub fn missing_parameter(name: &str) -> Self {
        Self::new(
            ErrorCode::MissingParameter,
            format!("Required query parameter '{}' is missing", name),
        )
    }

    /// Create a NotFound error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an UpstreamFailed error.
    pub fn upstream_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamFailed, message)
    }

    /// Create a Timeout error.
    pub fn timeout(operation: &str) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Operation '{}' timed out", operation),
        )
    }

    /// Create a ServiceUnavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM COLLABORATOR ERRORS
// ============================================================================

impl From<NewsError> for ApiError {
    fn from(err: NewsError) -> Self {
        tracing::error!(%err, "News provider error");
        match err {
            NewsError::MissingApiKey => {
                ApiError::service_unavailable("News provider is not configured")
            }
            NewsError::RequestFailed { status, .. } => {
                ApiError::upstream_failed(format!("News provider returned status {}", status))
            }
            NewsError::InvalidResponse { .. } => {
                ApiError::upstream_failed("News provider returned an unreadable response")
            }
        }
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        tracing::error!(%err, "Market provider error");
        match err {
            MarketError::RequestFailed { ticker, status, .. } => ApiError::upstream_failed(
                format!("Market provider returned status {} for {}", status, ticker),
            ),
            MarketError::InvalidResponse { ticker, .. } => ApiError::upstream_failed(format!(
                "Market provider returned an unreadable response for {}",
                ticker
            )),
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::UpstreamFailed.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ErrorCode::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            ErrorCode::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_constructors() {
        let err = ApiError::invalid_input("text too short");
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "text too short");

        let err = ApiError::missing_parameter("ticker");
        assert!(err.message.contains("ticker"));
    }

    #[test]
    fn test_serialization_uses_screaming_snake_case() {
        let err = ApiError::upstream_failed("boom");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("UPSTREAM_FAILED"));
    }

    #[test]
    fn test_news_error_conversion() {
        let err: ApiError = NewsError::MissingApiKey.into();
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);

        let err: ApiError = NewsError::RequestFailed {
            status: 401,
            message: "bad key".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::UpstreamFailed);
        assert!(err.message.contains("401"));
    }

    #[test]
    fn test_market_error_conversion() {
        let err: ApiError = MarketError::InvalidResponse {
            ticker: "AAPL".to_string(),
            reason: "no chart".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::UpstreamFailed);
        assert!(err.message.contains("AAPL"));
    }
}

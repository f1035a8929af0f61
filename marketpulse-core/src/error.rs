//! Error types for MarketPulse operations.

use thiserror::Error;

/// Sentiment provider errors.
///
/// All variants are recovered inside the fallback pipeline and never surface
/// to API callers; the pipeline's terminal stage is infallible.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SentimentError {
    /// Required credential absent; the adapter is unusable and must be
    /// skipped without any network call.
    #[error("Missing credential for {provider}: {field}")]
    MissingCredential { provider: String, field: String },

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    /// Response arrived but contained none of the recognized keywords.
    #[error("Ambiguous response from {provider}: {reason}")]
    AmbiguousResponse { provider: String, reason: String },

    #[error("Request to {provider} timed out after {timeout_ms}ms")]
    Timeout { provider: String, timeout_ms: u64 },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl SentimentError {
    /// Name of the provider that produced this error.
    pub fn provider(&self) -> &str {
        match self {
            Self::MissingCredential { provider, .. }
            | Self::RequestFailed { provider, .. }
            | Self::AmbiguousResponse { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::InvalidResponse { provider, .. } => provider,
        }
    }
}

/// Headline provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NewsError {
    #[error("News API key is not configured")]
    MissingApiKey,

    #[error("News request failed with status {status}: {message}")]
    RequestFailed { status: i32, message: String },

    #[error("Invalid news response: {reason}")]
    InvalidResponse { reason: String },
}

/// Market data provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarketError {
    #[error("Market request for {ticker} failed with status {status}: {message}")]
    RequestFailed {
        ticker: String,
        status: i32,
        message: String,
    },

    #[error("Invalid market response for {ticker}: {reason}")]
    InvalidResponse { ticker: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_error_display() {
        let err = SentimentError::MissingCredential {
            provider: "gemma".to_string(),
            field: "GEMINI_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("gemma"));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_sentiment_error_provider() {
        let err = SentimentError::Timeout {
            provider: "ollama".to_string(),
            timeout_ms: 120_000,
        };
        assert_eq!(err.provider(), "ollama");

        let err = SentimentError::AmbiguousResponse {
            provider: "gemma".to_string(),
            reason: "no keyword".to_string(),
        };
        assert_eq!(err.provider(), "gemma");
    }

    #[test]
    fn test_news_error_display() {
        let err = NewsError::RequestFailed {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert!(err.to_string().contains("429"));
    }
}

//! Sentiment primitive types.
//!
//! Pure data types for sentiment classification. Provider traits and the
//! fallback pipeline live in marketpulse-sentiment.

use serde::{Deserialize, Serialize};

// ============================================================================
// SENTIMENT LABEL
// ============================================================================

/// Classification label for a piece of text.
///
/// `Unknown` and `Error` exist for wire compatibility with callers that
/// inspect raw provider output; the pipeline itself only ever returns
/// `Positive`, `Negative`, or `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Unknown,
    Error,
}

impl SentimentLabel {
    /// Wire string representation (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Unknown => "unknown",
            Self::Error => "error",
        }
    }

    /// Whether this label is a definite classification.
    pub fn is_classified(&self) -> bool {
        matches!(self, Self::Positive | Self::Negative | Self::Neutral)
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SENTIMENT RESULT
// ============================================================================

/// The normalized result shape shared by every classification stage.
///
/// Immutable once constructed. The `model` field always identifies the stage
/// that actually produced the result ("gemma", "ollama", or "local"), so a
/// caller can audit which provider answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SentimentResult {
    /// The input text that was classified.
    pub text: String,
    /// Classification label.
    pub sentiment: SentimentLabel,
    /// Confidence in [0, 1]. Fixed per stage and label, not derived from
    /// score magnitude; callers distinguish fallback answers by the lower
    /// constant.
    pub confidence: f32,
    /// Identifier of the producing stage.
    pub model: String,
}

impl SentimentResult {
    /// Construct a result, clamping confidence into [0, 1].
    pub fn new(
        text: impl Into<String>,
        sentiment: SentimentLabel,
        confidence: f32,
        model: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            sentiment,
            confidence: confidence.clamp(0.0, 1.0),
            model: model.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"positive\"");
        let json = serde_json::to_string(&SentimentLabel::Neutral).unwrap();
        assert_eq!(json, "\"neutral\"");
    }

    #[test]
    fn test_label_roundtrip() {
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
            SentimentLabel::Unknown,
            SentimentLabel::Error,
        ] {
            let json = serde_json::to_string(&label).unwrap();
            let back: SentimentLabel = serde_json::from_str(&json).unwrap();
            assert_eq!(back, label);
        }
    }

    #[test]
    fn test_is_classified() {
        assert!(SentimentLabel::Positive.is_classified());
        assert!(SentimentLabel::Neutral.is_classified());
        assert!(!SentimentLabel::Unknown.is_classified());
        assert!(!SentimentLabel::Error.is_classified());
    }

    #[test]
    fn test_result_clamps_confidence() {
        let result = SentimentResult::new("text", SentimentLabel::Positive, 1.5, "gemma");
        assert_eq!(result.confidence, 1.0);
        let result = SentimentResult::new("text", SentimentLabel::Negative, -0.5, "gemma");
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_result_serialization_shape() {
        let result = SentimentResult::new("rally", SentimentLabel::Positive, 0.98, "gemma");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["text"], "rally");
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["model"], "gemma");
    }
}

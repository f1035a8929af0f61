//! Remote sentiment provider adapters.
//!
//! Each adapter translates one backend's protocol into the shared
//! [`SentimentResult`](marketpulse_core::SentimentResult) shape. Both remote
//! adapters share the same prompt and the same keyword-matching rule for the
//! free-form response text.

pub mod gemma;
pub mod ollama;

pub use gemma::GemmaProvider;
pub use ollama::OllamaProvider;

use marketpulse_core::{SentimentError, SentimentLabel};

/// Build the classification prompt sent to every remote provider.
pub fn classification_prompt(text: &str) -> String {
    format!(
        "Classify this text as Positive, Negative, or Neutral: {}",
        text
    )
}

/// Extract a label from free-form provider output.
///
/// Case-insensitive substring match, checked in the fixed order positive,
/// negative, neutral; the first keyword found wins. Accepting free-form text
/// avoids depending on strict provider schema compliance, at the cost of
/// misreading responses like "this is not positive". Known limitation, kept
/// deliberately.
pub fn parse_label(raw: &str) -> Option<SentimentLabel> {
    let lowered = raw.to_lowercase();
    if lowered.contains("positive") {
        Some(SentimentLabel::Positive)
    } else if lowered.contains("negative") {
        Some(SentimentLabel::Negative)
    } else if lowered.contains("neutral") {
        Some(SentimentLabel::Neutral)
    } else {
        None
    }
}

// ============================================================================
// ERROR CONSTRUCTOR HELPERS
// ============================================================================

pub(crate) fn missing_credential(provider: &str, field: &str) -> SentimentError {
    SentimentError::MissingCredential {
        provider: provider.to_string(),
        field: field.to_string(),
    }
}

pub(crate) fn request_failed(
    provider: &str,
    status: i32,
    message: impl Into<String>,
) -> SentimentError {
    SentimentError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    }
}

pub(crate) fn ambiguous_response(provider: &str, reason: impl Into<String>) -> SentimentError {
    SentimentError::AmbiguousResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> SentimentError {
    SentimentError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_case_insensitive() {
        assert_eq!(parse_label("POSITIVE"), Some(SentimentLabel::Positive));
        assert_eq!(
            parse_label("The sentiment is Negative."),
            Some(SentimentLabel::Negative)
        );
        assert_eq!(parse_label("neutral"), Some(SentimentLabel::Neutral));
    }

    #[test]
    fn test_parse_label_first_match_order() {
        // positive is checked before negative before neutral.
        assert_eq!(
            parse_label("The outlook is NEGATIVE but also positive"),
            Some(SentimentLabel::Positive)
        );
        assert_eq!(
            parse_label("neutral leaning negative"),
            Some(SentimentLabel::Negative)
        );
    }

    #[test]
    fn test_parse_label_no_keyword() {
        assert_eq!(parse_label("I cannot classify this."), None);
        assert_eq!(parse_label(""), None);
    }

    #[test]
    fn test_parse_label_substring_limitation() {
        // Documented trade-off: negation is not understood.
        assert_eq!(
            parse_label("This is not positive"),
            Some(SentimentLabel::Positive)
        );
    }

    #[test]
    fn test_classification_prompt_contains_text() {
        let prompt = classification_prompt("Stocks rally");
        assert!(prompt.contains("Positive, Negative, or Neutral"));
        assert!(prompt.ends_with("Stocks rally"));
    }
}

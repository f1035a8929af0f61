//! Deterministic local sentiment classifier.
//!
//! Lexicon-based polarity scorer with no network dependency. This is the
//! terminal fallback of the pipeline: it never fails, so the pipeline can
//! guarantee a result to every caller.

use marketpulse_core::{SentimentLabel, SentimentResult};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Model tag reported in results produced by the local classifier.
pub const LOCAL_MODEL_TAG: &str = "local";

/// Fixed confidence for local results. A constant rather than a function of
/// score magnitude: callers tell a degraded answer apart from a
/// provider-backed one by this lower value.
pub const LOCAL_CONFIDENCE: f32 = 0.70;

/// Polarity thresholds: above → positive, below the negation → negative.
const POLARITY_THRESHOLD: f32 = 0.2;

/// Term polarity weights, finance-leaning. Scores are averaged over the
/// matched terms only, so a single strong word in a long headline still
/// moves the needle.
static LEXICON: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    let terms: &[(&str, f32)] = &[
        // positive
        ("rally", 0.8),
        ("rallies", 0.8),
        ("surge", 0.7),
        ("surges", 0.7),
        ("soar", 0.8),
        ("soars", 0.8),
        ("jump", 0.6),
        ("jumps", 0.6),
        ("gain", 0.6),
        ("gains", 0.6),
        ("climb", 0.5),
        ("climbs", 0.5),
        ("rebound", 0.6),
        ("recovery", 0.5),
        ("recovers", 0.5),
        ("record", 0.5),
        ("high", 0.4),
        ("highs", 0.4),
        ("strong", 0.5),
        ("growth", 0.5),
        ("profit", 0.6),
        ("profits", 0.6),
        ("beat", 0.5),
        ("beats", 0.5),
        ("bullish", 0.8),
        ("boom", 0.7),
        ("upbeat", 0.6),
        ("optimism", 0.6),
        ("optimistic", 0.6),
        ("upgrade", 0.5),
        ("outperform", 0.6),
        ("win", 0.5),
        ("wins", 0.5),
        ("best", 0.7),
        ("good", 0.6),
        ("great", 0.8),
        ("positive", 0.7),
        // negative
        ("crash", -0.9),
        ("crashes", -0.9),
        ("plunge", -0.8),
        ("plunges", -0.8),
        ("slump", -0.7),
        ("slumps", -0.7),
        ("tumble", -0.7),
        ("tumbles", -0.7),
        ("sink", -0.6),
        ("sinks", -0.6),
        ("fall", -0.5),
        ("falls", -0.5),
        ("drop", -0.5),
        ("drops", -0.5),
        ("decline", -0.5),
        ("declines", -0.5),
        ("loss", -0.6),
        ("losses", -0.6),
        ("low", -0.4),
        ("lows", -0.4),
        ("weak", -0.5),
        ("bearish", -0.8),
        ("selloff", -0.7),
        ("fear", -0.6),
        ("fears", -0.6),
        ("miss", -0.5),
        ("misses", -0.5),
        ("recession", -0.7),
        ("crisis", -0.8),
        ("downgrade", -0.5),
        ("layoffs", -0.6),
        ("fraud", -0.8),
        ("default", -0.6),
        ("worst", -0.7),
        ("bad", -0.6),
        ("poor", -0.6),
        ("negative", -0.7),
        ("war", -0.6),
        ("tariff", -0.4),
        ("tariffs", -0.4),
        ("inflation", -0.4),
    ];
    terms.iter().copied().collect()
});

/// Deterministic polarity-based classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClassifier;

impl LocalClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Polarity score in [-1, 1]: average weight of the lexicon terms found
    /// in the text, 0.0 when none match.
    pub fn polarity(&self, text: &str) -> f32 {
        let mut sum = 0.0f32;
        let mut matched = 0usize;

        for token in tokenize(text) {
            if let Some(weight) = LEXICON.get(token.as_str()) {
                sum += weight;
                matched += 1;
            }
        }

        if matched == 0 {
            0.0
        } else {
            sum / matched as f32
        }
    }

    /// Classify a text. Polarity above 0.2 is positive, below -0.2 negative,
    /// neutral otherwise. Never fails.
    pub fn classify(&self, text: &str) -> SentimentResult {
        let polarity = self.polarity(text);
        let label = if polarity > POLARITY_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -POLARITY_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        SentimentResult::new(text, label, LOCAL_CONFIDENCE, LOCAL_MODEL_TAG)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rally_headline_is_positive() {
        let classifier = LocalClassifier::new();
        let result = classifier.classify("Stocks rally as market hits record high");
        assert_eq!(result.sentiment, SentimentLabel::Positive);
        assert_eq!(result.confidence, LOCAL_CONFIDENCE);
        assert_eq!(result.model, LOCAL_MODEL_TAG);
    }

    #[test]
    fn test_crash_headline_is_negative() {
        let classifier = LocalClassifier::new();
        let result = classifier.classify("Markets crash amid recession fears");
        assert_eq!(result.sentiment, SentimentLabel::Negative);
    }

    #[test]
    fn test_unmatched_text_is_neutral() {
        let classifier = LocalClassifier::new();
        let result = classifier.classify("Quarterly report scheduled for Tuesday");
        assert_eq!(result.sentiment, SentimentLabel::Neutral);
        assert_eq!(classifier.polarity("Quarterly report scheduled for Tuesday"), 0.0);
    }

    #[test]
    fn test_mixed_text_averages() {
        let classifier = LocalClassifier::new();
        // "gains" (0.6) and "losses" (-0.6) cancel to neutral.
        let result = classifier.classify("Banking gains offset by tech losses");
        assert_eq!(result.sentiment, SentimentLabel::Neutral);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let classifier = LocalClassifier::new();
        assert_eq!(
            classifier.polarity("RALLY!"),
            classifier.polarity("rally")
        );
    }

    #[test]
    fn test_deterministic() {
        let classifier = LocalClassifier::new();
        let a = classifier.classify("Profits surge on strong growth");
        let b = classifier.classify("Profits surge on strong growth");
        assert_eq!(a, b);
    }

    #[test]
    fn test_classify_never_panics_on_odd_input() {
        let classifier = LocalClassifier::new();
        for text in ["", "   ", "1234", "日経平均株価", "a\u{0}b"] {
            let result = classifier.classify(text);
            assert!(result.sentiment.is_classified());
        }
    }
}

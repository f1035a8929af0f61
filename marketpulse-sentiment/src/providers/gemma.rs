//! Gemma (Gemini API) provider adapter.

use async_trait::async_trait;
use marketpulse_core::{SentimentError, SentimentLabel, SentimentResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{
    ambiguous_response, classification_prompt, invalid_response, missing_credential, parse_label,
    request_failed,
};
use crate::SentimentProvider;

/// Model tag reported in results produced by this adapter.
pub const GEMMA_MODEL_TAG: &str = "gemma";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

// ============================================================================
// PROVIDER
// ============================================================================

/// Cloud sentiment adapter backed by the Gemini generateContent endpoint.
///
/// The credential is checked before any network I/O: an absent key fails the
/// stage immediately so the pipeline can advance within the same invocation.
pub struct GemmaProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GemmaProvider {
    /// Create a new Gemma provider.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key; `None` makes every attempt fail fast
    /// * `model` - Model name (e.g., "gemini-2.0-flash")
    /// * `timeout` - Upper bound on a single request
    pub fn new(api_key: Option<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    /// Override the endpoint base URL (used by tests against a stub server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Concatenated text of the first candidate's parts.
    fn response_text(response: GenerateContentResponse) -> String {
        response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    /// Per-label confidence constants for this provider.
    fn confidence_for(label: SentimentLabel) -> f32 {
        match label {
            SentimentLabel::Neutral => 0.95,
            _ => 0.98,
        }
    }
}

#[async_trait]
impl SentimentProvider for GemmaProvider {
    async fn classify(&self, text: &str) -> Result<SentimentResult, SentimentError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| missing_credential(GEMMA_MODEL_TAG, "GEMINI_API_KEY"))?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: classification_prompt(text),
                }],
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| request_failed(GEMMA_MODEL_TAG, 0, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(request_failed(
                GEMMA_MODEL_TAG,
                status.as_u16() as i32,
                error_text,
            ));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            invalid_response(GEMMA_MODEL_TAG, format!("Failed to parse response: {}", e))
        })?;

        let raw = Self::response_text(body);
        let label = parse_label(&raw).ok_or_else(|| {
            ambiguous_response(GEMMA_MODEL_TAG, "no sentiment keyword in response")
        })?;

        Ok(SentimentResult::new(
            text,
            label,
            Self::confidence_for(label),
            GEMMA_MODEL_TAG,
        ))
    }

    fn name(&self) -> &str {
        GEMMA_MODEL_TAG
    }
}

impl std::fmt::Debug for GemmaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GemmaProvider")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        // Deliberately unroutable base URL: a network attempt would error
        // differently than the credential check.
        let provider = GemmaProvider::new(None, "gemini-2.0-flash", Duration::from_secs(1))
            .with_base_url("http://invalid.localhost:1");

        let err = provider.classify("some text").await.unwrap_err();
        assert!(matches!(err, SentimentError::MissingCredential { .. }));
        assert_eq!(err.provider(), "gemma");
    }

    #[tokio::test]
    async fn test_blank_key_treated_as_missing() {
        let provider = GemmaProvider::new(
            Some("   ".to_string()),
            "gemini-2.0-flash",
            Duration::from_secs(1),
        );
        let err = provider.classify("some text").await.unwrap_err();
        assert!(matches!(err, SentimentError::MissingCredential { .. }));
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: CandidateContent {
                    parts: vec![
                        CandidatePart {
                            text: "Posi".to_string(),
                        },
                        CandidatePart {
                            text: "tive".to_string(),
                        },
                    ],
                },
            }],
        };
        assert_eq!(GemmaProvider::response_text(response), "Positive");
    }

    #[test]
    fn test_confidence_constants() {
        assert_eq!(GemmaProvider::confidence_for(SentimentLabel::Positive), 0.98);
        assert_eq!(GemmaProvider::confidence_for(SentimentLabel::Negative), 0.98);
        assert_eq!(GemmaProvider::confidence_for(SentimentLabel::Neutral), 0.95);
    }
}

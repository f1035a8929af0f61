//! Ollama provider adapter (local inference server).

use async_trait::async_trait;
use marketpulse_core::{SentimentError, SentimentLabel, SentimentResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{
    ambiguous_response, classification_prompt, invalid_response, parse_label, request_failed,
};
use crate::SentimentProvider;

/// Model tag reported in results produced by this adapter.
pub const OLLAMA_MODEL_TAG: &str = "ollama";

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// One generation chunk. With `stream: false` the body is a single object;
/// streamed bodies are newline-delimited chunks of the same shape.
#[derive(Debug, Clone, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
}

// ============================================================================
// PROVIDER
// ============================================================================

/// Sentiment adapter backed by an Ollama `/api/generate` endpoint.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    ///
    /// # Arguments
    /// * `base_url` - Ollama server URL (e.g., "http://localhost:11434")
    /// * `model` - Model name (e.g., "gpt-oss:20b")
    /// * `timeout` - Upper bound on a single request; local inference can be
    ///   slow, so this is typically 90-120 seconds
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            timeout,
        }
    }

    /// Check whether the server is reachable, for health reporting.
    pub async fn check_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(2))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Concatenate the `response` fields of a generate body.
    ///
    /// Each line is JSON-parsed before its text is taken, so protocol framing
    /// (chunk metadata, `done` markers) never leaks into keyword matching.
    /// Handles both the single-object `stream: false` body and a streamed
    /// newline-delimited body.
    fn concat_response_text(body: &str) -> Result<String, String> {
        if let Ok(chunk) = serde_json::from_str::<GenerateChunk>(body) {
            return Ok(chunk.response);
        }

        let mut text = String::new();
        let mut parsed_any = false;
        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<GenerateChunk>(line) {
                Ok(chunk) => {
                    parsed_any = true;
                    text.push_str(&chunk.response);
                }
                Err(e) => return Err(format!("unparseable chunk: {}", e)),
            }
        }

        if parsed_any {
            Ok(text)
        } else {
            Err("empty response body".to_string())
        }
    }

    /// Per-label confidence constants for this provider.
    fn confidence_for(label: SentimentLabel) -> f32 {
        match label {
            SentimentLabel::Neutral => 0.85,
            _ => 0.90,
        }
    }
}

#[async_trait]
impl SentimentProvider for OllamaProvider {
    async fn classify(&self, text: &str) -> Result<SentimentResult, SentimentError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: classification_prompt(text),
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                request_failed(OLLAMA_MODEL_TAG, 0, format!("HTTP request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| invalid_response(OLLAMA_MODEL_TAG, format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(request_failed(
                OLLAMA_MODEL_TAG,
                status.as_u16() as i32,
                body,
            ));
        }

        let raw = Self::concat_response_text(&body)
            .map_err(|reason| invalid_response(OLLAMA_MODEL_TAG, reason))?;

        let label = parse_label(&raw).ok_or_else(|| {
            ambiguous_response(OLLAMA_MODEL_TAG, "no sentiment keyword in response")
        })?;

        Ok(SentimentResult::new(
            text,
            label,
            Self::confidence_for(label),
            OLLAMA_MODEL_TAG,
        ))
    }

    fn name(&self) -> &str {
        OLLAMA_MODEL_TAG
    }
}

impl std::fmt::Debug for OllamaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_single_object_body() {
        let body = r#"{"model":"gpt-oss:20b","response":"Positive","done":true}"#;
        assert_eq!(
            OllamaProvider::concat_response_text(body).unwrap(),
            "Positive"
        );
    }

    #[test]
    fn test_concat_streamed_body() {
        let body = concat!(
            "{\"response\":\"Nega\",\"done\":false}\n",
            "{\"response\":\"tive\",\"done\":false}\n",
            "{\"response\":\"\",\"done\":true}\n",
        );
        assert_eq!(
            OllamaProvider::concat_response_text(body).unwrap(),
            "Negative"
        );
    }

    #[test]
    fn test_concat_rejects_non_json_body() {
        assert!(OllamaProvider::concat_response_text("<html>busy</html>").is_err());
        assert!(OllamaProvider::concat_response_text("").is_err());
    }

    #[test]
    fn test_framing_fields_do_not_reach_keyword_match() {
        // A chunk whose metadata mentions a keyword must not classify.
        let body = r#"{"model":"positive-vibes:7b","response":"I cannot say","done":true}"#;
        let text = OllamaProvider::concat_response_text(body).unwrap();
        assert_eq!(parse_label(&text), None);
    }

    #[test]
    fn test_confidence_constants() {
        assert_eq!(
            OllamaProvider::confidence_for(SentimentLabel::Positive),
            0.90
        );
        assert_eq!(
            OllamaProvider::confidence_for(SentimentLabel::Negative),
            0.90
        );
        assert_eq!(OllamaProvider::confidence_for(SentimentLabel::Neutral), 0.85);
    }
}

//! News headline types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single news headline as consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Headline {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl Headline {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: None,
            url: None,
            published: None,
        }
    }
}

/// Response envelope for headline lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HeadlinesResponse {
    pub headlines: Vec<Headline>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_omits_empty_fields() {
        let headline = Headline::new("Markets open higher");
        let json = serde_json::to_string(&headline).unwrap();
        assert!(json.contains("Markets open higher"));
        assert!(!json.contains("source"));
        assert!(!json.contains("url"));
    }

    #[test]
    fn test_headlines_response_roundtrip() {
        let response = HeadlinesResponse {
            headlines: vec![Headline::new("a"), Headline::new("b")],
        };
        let json = serde_json::to_string(&response).unwrap();
        let back: HeadlinesResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }
}

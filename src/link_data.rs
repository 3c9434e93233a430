/// Data structures for LinkLens
use serde::{Deserialize, Serialize};

/// Body of a POST /shorten request
#[derive(Debug, Clone, Serialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Response from POST /shorten
///
/// The backend also echoes the original URL; only the short code is
/// consumed, and unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ShortenResponse {
    pub short_code: String,
}

/// Response from GET /stats/{short_code}
///
/// `ai_insights` is null (or absent) while analysis is still pending and an
/// object once complete. Visit counts and the original URL also come back on
/// this endpoint but are not consumed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StatsResponse {
    #[serde(default)]
    pub ai_insights: Option<AiInsights>,
}

/// AI-generated metadata about the shortened link
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AiInsights {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl AiInsights {
    /// Category for display; missing or empty falls back to "General".
    pub fn category_text(&self) -> &str {
        self.category
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("General")
    }

    /// Summary for display; missing or empty falls back to a placeholder.
    pub fn summary_text(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("No summary available.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_request_serialization() {
        let request = ShortenRequest {
            url: "https://example.com/some/long/path".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"url":"https://example.com/some/long/path"}"#);
    }

    #[test]
    fn test_shorten_response_ignores_extra_fields() {
        // Shape the backend actually sends
        let json = r#"{"short_code":"abc123","original_url":"https://example.com"}"#;
        let response: ShortenResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.short_code, "abc123");
    }

    #[test]
    fn test_stats_pending_when_insights_null() {
        let json = r#"{"short_code":"abc123","original_url":"https://example.com","visits":3,"ai_insights":null}"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();

        assert!(stats.ai_insights.is_none());
    }

    #[test]
    fn test_stats_pending_when_insights_absent() {
        let stats: StatsResponse = serde_json::from_str("{}").unwrap();

        assert!(stats.ai_insights.is_none());
    }

    #[test]
    fn test_stats_with_complete_insights() {
        let json = r#"{"ai_insights":{"category":"News","summary":"Daily world news coverage."}}"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();

        let insights = stats.ai_insights.unwrap();
        assert_eq!(insights.category_text(), "News");
        assert_eq!(insights.summary_text(), "Daily world news coverage.");
    }

    #[test]
    fn test_insights_defaults_when_fields_missing() {
        let json = r#"{"ai_insights":{"category":"News"}}"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();

        let insights = stats.ai_insights.unwrap();
        assert_eq!(insights.category_text(), "News");
        assert_eq!(insights.summary_text(), "No summary available.");
    }

    #[test]
    fn test_insights_defaults_when_fields_empty() {
        let json = r#"{"ai_insights":{"category":"","summary":""}}"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();

        let insights = stats.ai_insights.unwrap();
        assert_eq!(insights.category_text(), "General");
        assert_eq!(insights.summary_text(), "No summary available.");
    }
}

//! HTTP client for the shortening backend.
//!
//! Two JSON endpoints: `POST /shorten` and `GET /stats/{short_code}`. Both
//! are resolved against the page origin, so the client works wherever the
//! backend serves it. On wasm32 reqwest rides on the browser fetch API.

use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::link_data::{ShortenRequest, ShortenResponse, StatsResponse};

/// Client for the shortening backend
pub struct ApiClient {
    client: Client,
    base: Url,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("browser window unavailable")]
    NoWindow,
}

impl ApiClient {
    /// Create a client rooted at the given base URL
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    /// Create a client rooted at the page origin (`window.location.origin`)
    pub fn from_window() -> Result<Self, ApiError> {
        let window = web_sys::window().ok_or(ApiError::NoWindow)?;
        let origin = window.location().origin().map_err(|_| ApiError::NoWindow)?;
        Ok(Self::new(Url::parse(&origin)?))
    }

    /// The full short URL shown to the user: `<origin>/<short_code>`
    pub fn short_url(&self, short_code: &str) -> String {
        let origin = self.base.origin().ascii_serialization();
        format!("{}/{}", origin, short_code)
    }

    /// Submit a URL for shortening
    pub async fn shorten(&self, url: &str) -> Result<ShortenResponse, ApiError> {
        let endpoint = self.endpoint("shorten")?;
        let body = ShortenRequest {
            url: url.to_string(),
        };

        let response = self.client.post(endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    /// Fetch visit stats and AI insights for a short code
    pub async fn stats(&self, short_code: &str) -> Result<StatsResponse, ApiError> {
        let endpoint = self.endpoint(&format!("stats/{}", short_code))?;

        let response = self.client.get(endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_short_url_from_origin() {
        let api = client("https://x.test");
        assert_eq!(api.short_url("abc123"), "https://x.test/abc123");
    }

    #[test]
    fn test_short_url_ignores_trailing_slash() {
        let api = client("https://x.test/");
        assert_eq!(api.short_url("abc123"), "https://x.test/abc123");
    }

    #[test]
    fn test_shorten_endpoint() {
        let api = client("https://x.test");
        let endpoint = api.endpoint("shorten").unwrap();
        assert_eq!(endpoint.as_str(), "https://x.test/shorten");
    }

    #[test]
    fn test_stats_endpoint() {
        let api = client("http://localhost:8000");
        let endpoint = api.endpoint("stats/abc123").unwrap();
        assert_eq!(endpoint.as_str(), "http://localhost:8000/stats/abc123");
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status(500);
        assert_eq!(err.to_string(), "server returned status 500");
    }
}

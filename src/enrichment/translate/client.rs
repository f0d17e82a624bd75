//! LibreTranslate HTTP client
//!
//! Language detection and translation for book descriptions.
//! See: https://github.com/LibreTranslate/LibreTranslate
//!
//! Usually self-hosted; public instances require an API key.

use std::time::Duration;

use super::dto;
use crate::enrichment::domain::EnrichmentError;
use crate::enrichment::{DEFAULT_REQUEST_TIMEOUT, http_client};

/// Default API root (local instance)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// LibreTranslate API client
pub struct TranslateClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TranslateClient {
    /// Create a client for a local instance
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_settings(DEFAULT_BASE_URL, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with an explicit API root and per-request timeout
    pub fn with_settings(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client: http_client(timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Detect the language of `text`, returning the most confident code.
    pub async fn detect(&self, text: &str) -> Result<String, EnrichmentError> {
        let body = self.form_body(&[("q", text)]);
        let response: dto::DetectResponse = self.post_form("detect", body).await?;

        match response {
            dto::DetectResponse::Detections(detections) => detections
                .into_iter()
                .next()
                .map(|d| d.language)
                .ok_or_else(|| EnrichmentError::InvalidResponse("no language detected".into())),
            dto::DetectResponse::Error { error } => Err(EnrichmentError::ApiError(error)),
        }
    }

    /// Translate `text` between two language codes.
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, EnrichmentError> {
        let source = source.to_lowercase();
        let target = target.to_lowercase();
        let body = self.form_body(&[("q", text), ("source", &source), ("target", &target)]);
        let response: dto::TranslateResponse = self.post_form("translate", body).await?;

        match response {
            dto::TranslateResponse::Translated { translated_text } => Ok(translated_text),
            dto::TranslateResponse::Error { error } => Err(EnrichmentError::ApiError(error)),
        }
    }

    /// URL-encoded form body, with the API key appended when configured
    fn form_body(&self, fields: &[(&str, &str)]) -> String {
        let mut pairs: Vec<String> = fields
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect();
        if let Some(ref key) = self.api_key {
            pairs.push(format!("api_key={}", urlencoding::encode(key)));
        }
        pairs.join("&")
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: String,
    ) -> Result<T, EnrichmentError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, "Calling LibreTranslate");

        let response = self
            .http_client
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        // Error bodies share the payload's envelope, so parse before checking status
        let text = response
            .text()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        match serde_json::from_str::<T>(&text) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            ))),
            Err(e) => Err(EnrichmentError::Parse(e.to_string())),
        }
    }
}

impl Default for TranslateClient {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TranslateClient::new(None);
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_form_body_encoding() {
        let client = TranslateClient::new(None);
        let body = client.form_body(&[("q", "Olá & adeus"), ("source", "pt"), ("target", "en")]);
        assert_eq!(body, "q=Ol%C3%A1%20%26%20adeus&source=pt&target=en");
    }

    #[test]
    fn test_form_body_with_api_key() {
        let client = TranslateClient::new(Some("k3y".to_string()));
        let body = client.form_body(&[("q", "hello")]);
        assert_eq!(body, "q=hello&api_key=k3y");
    }
}

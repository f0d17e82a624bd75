//! Google Books HTTP client
//!
//! Handles communication with the Google Books volumes API.
//! See: https://developers.google.com/books/docs/v1/using
//!
//! An API key is optional; anonymous requests share a small daily quota.

use std::time::Duration;

use super::{adapter, dto};
use crate::enrichment::domain::{BookCandidate, EnrichmentError};
use crate::enrichment::{DEFAULT_REQUEST_TIMEOUT, http_client};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Google Books API client
pub struct GoogleBooksClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    /// Create a new client against the public API
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

    /// Look up a book by ISBN.
    ///
    /// Returns `Ok(None)` when the search has zero items.
    pub async fn lookup_isbn(
        &self,
        isbn: &str,
    ) -> Result<Option<BookCandidate>, EnrichmentError> {
        let response = self.send_volumes_request(isbn).await?;
        tracing::debug!(isbn, total_items = response.total_items, "Google Books answered");
        Ok(adapter::to_candidate(response))
    }

    fn volumes_url(&self) -> String {
        format!("{}/books/v1/volumes", self.base_url)
    }

    fn query_params(&self, isbn: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", format!("isbn:{}", isbn))];
        if let Some(ref key) = self.api_key {
            params.push(("key", key.clone()));
        }
        params
    }

    /// Send the HTTP request and parse the response
    async fn send_volumes_request(
        &self,
        isbn: &str,
    ) -> Result<dto::VolumesResponse, EnrichmentError> {
        let url = self.volumes_url();
        tracing::debug!(%url, isbn, "Querying Google Books");

        let response = self
            .http_client
            .get(&url)
            .query(&self.query_params(isbn))
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EnrichmentError::NotFound);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        if !status.is_success() {
            if let Ok(error) = response.json::<dto::ApiErrorResponse>().await {
                return Err(EnrichmentError::ApiError(error.error.message));
            }
            return Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::VolumesResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

impl Default for GoogleBooksClient {
    fn default() -> Self {
        Self::new(None)
    }
}

//! Open Library HTTP client
//!
//! Handles communication with the Open Library JSON endpoints.
//! See: https://openlibrary.org/developers/api

use std::time::Duration;

use super::{adapter, dto};
use crate::enrichment::domain::{BookCandidate, EnrichmentError};
use crate::enrichment::{DEFAULT_REQUEST_TIMEOUT, http_client};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

/// Open Library API client
pub struct OpenLibraryClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenLibraryClient {
    /// Create a new client against the public API
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with an explicit API root and per-request timeout
    pub fn with_settings(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http_client: http_client(timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Look up the edition for an ISBN.
    ///
    /// An unknown ISBN is reported as [`EnrichmentError::NotFound`].
    pub async fn lookup_isbn(&self, isbn: &str) -> Result<Option<BookCandidate>, EnrichmentError> {
        let edition: dto::EditionResponse = self.get_json(&self.edition_url(isbn)).await?;
        Ok(Some(adapter::to_candidate(edition)))
    }

    /// Resolve an author reference such as `/authors/OL79034A` to a name.
    pub async fn resolve_author(&self, author_key: &str) -> Result<String, EnrichmentError> {
        let author: dto::AuthorResponse = self.get_json(&self.author_url(author_key)).await?;

        author
            .name
            .or(author.personal_name)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                EnrichmentError::InvalidResponse(format!("author {} has no name", author_key))
            })
    }

    fn edition_url(&self, isbn: &str) -> String {
        format!("{}/isbn/{}.json", self.base_url, isbn)
    }

    fn author_url(&self, author_key: &str) -> String {
        let key = author_key.trim();
        if key.starts_with('/') {
            format!("{}{}.json", self.base_url, key)
        } else {
            format!("{}/{}.json", self.base_url, key)
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, EnrichmentError> {
        tracing::debug!(%url, "Querying Open Library");

        let response = self
            .http_client
            .get(url)
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
            return Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

impl Default for OpenLibraryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenLibraryClient::new();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_edition_url() {
        let client = OpenLibraryClient::with_settings("http://localhost:8080/", Duration::from_secs(1));
        assert_eq!(
            client.edition_url("9780441172719"),
            "http://localhost:8080/isbn/9780441172719.json"
        );
    }

    #[test]
    fn test_author_url() {
        let client = OpenLibraryClient::new();
        assert_eq!(
            client.author_url("/authors/OL79034A"),
            "https://openlibrary.org/authors/OL79034A.json"
        );
        assert_eq!(
            client.author_url("authors/OL79034A"),
            "https://openlibrary.org/authors/OL79034A.json"
        );
    }
}

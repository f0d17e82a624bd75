//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use book_minder::enrichment::traits::GoogleBooksApi;
//!
//! async fn title_of<T: GoogleBooksApi>(client: &T, isbn: &str) -> Option<String> {
//!     client.lookup_isbn(isbn).await.ok().flatten().map(|c| c.title)
//! }
//! ```

use async_trait::async_trait;

use super::domain::{BookCandidate, EnrichmentError};

/// Trait for the primary bibliographic source.
#[async_trait]
pub trait GoogleBooksApi: Send + Sync {
    /// Look up a book by ISBN. `Ok(None)` means the search had no items.
    async fn lookup_isbn(&self, isbn: &str) -> Result<Option<BookCandidate>, EnrichmentError>;
}

/// Trait for the secondary bibliographic source.
#[async_trait]
pub trait OpenLibraryApi: Send + Sync {
    /// Look up an edition by ISBN.
    async fn lookup_isbn(&self, isbn: &str) -> Result<Option<BookCandidate>, EnrichmentError>;

    /// Resolve an author reference to the author's name.
    async fn resolve_author(&self, author_key: &str) -> Result<String, EnrichmentError>;
}

/// Trait for language detection and translation.
#[async_trait]
pub trait TranslationApi: Send + Sync {
    /// Detect the language of `text`.
    async fn detect(&self, text: &str) -> Result<String, EnrichmentError>;

    /// Translate `text` from `source` to `target`.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, EnrichmentError>;
}

// Implement traits for real clients

#[async_trait]
impl GoogleBooksApi for super::googlebooks::GoogleBooksClient {
    async fn lookup_isbn(&self, isbn: &str) -> Result<Option<BookCandidate>, EnrichmentError> {
        self.lookup_isbn(isbn).await
    }
}

#[async_trait]
impl OpenLibraryApi for super::openlibrary::OpenLibraryClient {
    async fn lookup_isbn(&self, isbn: &str) -> Result<Option<BookCandidate>, EnrichmentError> {
        self.lookup_isbn(isbn).await
    }

    async fn resolve_author(&self, author_key: &str) -> Result<String, EnrichmentError> {
        self.resolve_author(author_key).await
    }
}

#[async_trait]
impl TranslationApi for super::translate::TranslateClient {
    async fn detect(&self, text: &str) -> Result<String, EnrichmentError> {
        self.detect(text).await
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, EnrichmentError> {
        self.translate(text, source, target).await
    }
}

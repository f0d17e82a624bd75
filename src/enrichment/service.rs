//! Enrichment service - orchestrates ISBN lookup and record building
//!
//! This is the high-level API for turning an ISBN into a book record:
//! 1. Validate the ISBN (hyphens stripped, checksum checked)
//! 2. Refuse ISBNs already in the library
//! 3. Look the ISBN up on Google Books
//! 4. Only if Google Books has nothing, look it up on Open Library
//!    (resolving the author reference with a second request)
//! 5. For Google Books records, detect the description's language and
//!    translate it into the book's language when they differ
//! 6. Stamp the caller's ISBN when the source's is missing or invalid
//! 7. Capitalize the text fields
//! 8. Save the record, unless the source's ISBN is already in the library
//!    (an ISBN-10 request can come back as a stored ISBN-13)
//!
//! Steps 5 and the author lookup in 4 are best-effort: failures are logged
//! and reported as [`Degradation`]s, never as errors.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::db::BookStore;
use crate::enrichment::{
    DEFAULT_REQUEST_TIMEOUT,
    domain::{
        AuthorName, BookCandidate, Degradation, Enrichment, EnrichmentSource, LookupOutcome,
    },
    googlebooks::{self, GoogleBooksClient},
    openlibrary::{self, OpenLibraryClient},
    traits::{GoogleBooksApi, OpenLibraryApi, TranslationApi},
    translate::{self, TranslateClient, UNKNOWN_LANGUAGE},
};
use crate::error::CatalogError;
use crate::isbn::{self, Isbn};
use crate::model::Book;

/// Configuration for the enrichment service
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub google_books_url: String,
    /// Optional; anonymous requests work with a lower quota
    pub google_books_api_key: Option<String>,
    pub open_library_url: String,
    pub translate_url: String,
    pub translate_api_key: Option<String>,
    /// Timeout for each external request
    pub request_timeout: Duration,
    /// Whether to detect and translate descriptions at all
    pub translate_descriptions: bool,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            google_books_url: googlebooks::DEFAULT_BASE_URL.to_string(),
            google_books_api_key: None,
            open_library_url: openlibrary::DEFAULT_BASE_URL.to_string(),
            translate_url: translate::DEFAULT_BASE_URL.to_string(),
            translate_api_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            translate_descriptions: true,
        }
    }
}

impl From<&Config> for EnrichmentConfig {
    fn from(config: &Config) -> Self {
        Self {
            google_books_url: config.sources.google_books_url.clone(),
            google_books_api_key: config.credentials.google_books_api_key.clone(),
            open_library_url: config.sources.open_library_url.clone(),
            translate_url: config.sources.translate_url.clone(),
            translate_api_key: config.credentials.translate_api_key.clone(),
            request_timeout: config.sources.request_timeout(),
            translate_descriptions: config.sources.translate_descriptions,
        }
    }
}

/// Service for building book records from external sources
pub struct EnrichmentService {
    google_books: Arc<dyn GoogleBooksApi>,
    open_library: Arc<dyn OpenLibraryApi>,
    translator: Arc<dyn TranslationApi>,
    store: Arc<dyn BookStore>,
    translate_descriptions: bool,
}

impl EnrichmentService {
    /// Create a new enrichment service with the real HTTP clients
    pub fn new(config: EnrichmentConfig, store: Arc<dyn BookStore>) -> Self {
        Self {
            google_books: Arc::new(GoogleBooksClient::with_settings(
                config.google_books_url,
                config.google_books_api_key,
                config.request_timeout,
            )),
            open_library: Arc::new(OpenLibraryClient::with_settings(
                config.open_library_url,
                config.request_timeout,
            )),
            translator: Arc::new(TranslateClient::with_settings(
                config.translate_url,
                config.translate_api_key,
                config.request_timeout,
            )),
            store,
            translate_descriptions: config.translate_descriptions,
        }
    }

    /// Create a service from explicit client implementations
    pub fn with_clients(
        google_books: Arc<dyn GoogleBooksApi>,
        open_library: Arc<dyn OpenLibraryApi>,
        translator: Arc<dyn TranslationApi>,
        store: Arc<dyn BookStore>,
    ) -> Self {
        Self {
            google_books,
            open_library,
            translator,
            store,
            translate_descriptions: true,
        }
    }

    /// Turn description translation on or off
    pub fn translate_descriptions(mut self, enabled: bool) -> Self {
        self.translate_descriptions = enabled;
        self
    }

    /// Build, save and return the record for a new ISBN.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidIsbn`] if the ISBN fails validation
    /// - [`CatalogError::AlreadyExists`] if the library already has it, under
    ///   the requested ISBN or the one the source reported
    /// - [`CatalogError::NotFoundAnywhere`] if neither source knows it
    /// - [`CatalogError::Database`] if the store fails
    pub async fn enrich(&self, raw_isbn: &str) -> Result<Enrichment, CatalogError> {
        self.enrich_with_language(raw_isbn, None).await
    }

    /// Like [`enrich`](Self::enrich), but with the book's language supplied by
    /// the caller. It replaces the source's language before deciding whether
    /// to translate the description.
    pub async fn enrich_with_language(
        &self,
        raw_isbn: &str,
        declared_language: Option<&str>,
    ) -> Result<Enrichment, CatalogError> {
        let isbn = parse_isbn(raw_isbn)?;

        if self.store.exists(isbn.as_str()).await? {
            return Err(CatalogError::AlreadyExists(isbn.into_string()));
        }

        let enrichment = self.build(&isbn, declared_language).await?;
        if !self.store.insert(&enrichment.book).await? {
            tracing::info!(
                requested = %isbn,
                isbn = %enrichment.book.isbn,
                "Source ISBN is already in the library"
            );
            return Err(CatalogError::AlreadyExists(enrichment.book.isbn));
        }

        tracing::info!(
            isbn = %enrichment.book.isbn,
            source = %enrichment.source,
            translated = enrichment.translated,
            degradations = enrichment.degradations.len(),
            "Added \"{}\"",
            enrichment.book.title
        );
        Ok(enrichment)
    }

    /// Build the record without checking the library or saving it.
    pub async fn preview(
        &self,
        raw_isbn: &str,
        declared_language: Option<&str>,
    ) -> Result<Enrichment, CatalogError> {
        let isbn = parse_isbn(raw_isbn)?;
        self.build(&isbn, declared_language).await
    }

    async fn build(
        &self,
        isbn: &Isbn,
        declared_language: Option<&str>,
    ) -> Result<Enrichment, CatalogError> {
        let (mut candidate, source) = match self.query_google_books(isbn).await {
            Some(candidate) => (candidate, EnrichmentSource::GoogleBooks),
            None => (self.query_open_library(isbn).await?, EnrichmentSource::OpenLibrary),
        };

        let mut degradations = Vec::new();

        let author = self
            .resolve_author(std::mem::take(&mut candidate.author), &mut degradations)
            .await;

        if let Some(language) = declared_language.map(str::trim).filter(|l| !l.is_empty()) {
            candidate.language = language.to_string();
        }

        let mut book = candidate.into_book(author);

        // Open Library never carries a description
        let translated = source == EnrichmentSource::GoogleBooks
            && self.translate_descriptions
            && self.harmonize_description(&mut book, &mut degradations).await;

        book.isbn = authoritative_isbn(&book.isbn, isbn);

        Ok(Enrichment {
            book: book.normalized(),
            source,
            translated,
            degradations,
        })
    }

    /// Primary lookup. Anything but a match falls through to the secondary source.
    async fn query_google_books(&self, isbn: &Isbn) -> Option<BookCandidate> {
        match LookupOutcome::from_result(self.google_books.lookup_isbn(isbn.as_str()).await) {
            LookupOutcome::Found(candidate) => {
                tracing::info!(%isbn, "Found on Google Books");
                Some(candidate)
            }
            LookupOutcome::NotFound => {
                tracing::info!(%isbn, "No match on Google Books, trying Open Library");
                None
            }
            LookupOutcome::TransientError(e) => {
                tracing::warn!(%isbn, "Google Books lookup failed, trying Open Library: {}", e);
                None
            }
        }
    }

    /// Secondary lookup, the last resort: any failure means nobody has the book.
    async fn query_open_library(&self, isbn: &Isbn) -> Result<BookCandidate, CatalogError> {
        match LookupOutcome::from_result(self.open_library.lookup_isbn(isbn.as_str()).await) {
            LookupOutcome::Found(candidate) => {
                tracing::info!(%isbn, "Found on Open Library");
                Ok(candidate)
            }
            LookupOutcome::NotFound => {
                tracing::info!(%isbn, "No match on Open Library");
                Err(CatalogError::NotFoundAnywhere(isbn.to_string()))
            }
            LookupOutcome::TransientError(e) => {
                tracing::warn!(%isbn, "Open Library lookup failed: {}", e);
                Err(CatalogError::NotFoundAnywhere(isbn.to_string()))
            }
        }
    }

    async fn resolve_author(
        &self,
        author: AuthorName,
        degradations: &mut Vec<Degradation>,
    ) -> String {
        match author {
            AuthorName::Literal(name) => name,
            AuthorName::Unknown => String::new(),
            AuthorName::Reference(key) => match self.open_library.resolve_author(&key).await {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!("Could not resolve author {}: {}", key, e);
                    degradations.push(Degradation::AuthorResolution(e.to_string()));
                    String::new()
                }
            },
        }
    }

    /// Translate the description into the book's language if it is written in
    /// another one. Returns whether it was translated.
    async fn harmonize_description(
        &self,
        book: &mut Book,
        degradations: &mut Vec<Degradation>,
    ) -> bool {
        if book.description.trim().is_empty() {
            return false;
        }

        let detected = match self.translator.detect(&book.description).await {
            Ok(language) => language,
            Err(e) => {
                tracing::warn!(isbn = %book.isbn, "Language detection failed: {}", e);
                degradations.push(Degradation::LanguageDetection(e.to_string()));
                UNKNOWN_LANGUAGE.to_string()
            }
        };

        if !translate::is_translation_required(&detected, &book.language) {
            tracing::debug!(
                detected = %detected,
                language = %book.language,
                "Description needs no translation"
            );
            return false;
        }

        match self
            .translator
            .translate(&book.description, &detected, &book.language)
            .await
        {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(from = %detected, to = %book.language, "Translated description");
                book.description = text;
                true
            }
            Ok(_) => {
                tracing::warn!("Translation came back empty, keeping original description");
                degradations.push(Degradation::Translation("empty translation".to_string()));
                false
            }
            Err(e) => {
                tracing::warn!("Translation failed, keeping original description: {}", e);
                degradations.push(Degradation::Translation(e.to_string()));
                false
            }
        }
    }
}

/// Validate a caller-supplied ISBN.
pub fn parse_isbn(raw: &str) -> Result<Isbn, CatalogError> {
    Isbn::parse(raw).map_err(|reason| CatalogError::invalid_isbn(raw.trim(), reason))
}

/// The source's ISBN if it is present and valid, otherwise the caller's.
fn authoritative_isbn(source_isbn: &str, requested: &Isbn) -> String {
    let (normalized, valid) = isbn::validate(source_isbn);
    if valid {
        normalized
    } else {
        if !normalized.is_empty() {
            tracing::warn!(
                "Source reported invalid ISBN {:?}, using {}",
                source_isbn,
                requested
            );
        }
        requested.to_string()
    }
}

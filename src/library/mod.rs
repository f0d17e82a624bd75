//! The personal library: catalog operations over a [`BookStore`].
//!
//! Adding by ISBN goes through the enrichment pipeline; manual creation,
//! partial updates, lookups, deletion and search work on the store directly.
//! Every operation keys books by the hyphen-stripped ISBN.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, StreamExt};

use crate::config::Config;
use crate::db::{self, BookQuery, BookStore, SqliteBookStore};
use crate::enrichment::service::parse_isbn;
use crate::enrichment::{Enrichment, EnrichmentConfig, EnrichmentService, EnrichmentSource};
use crate::error::{CatalogError, ResultExt};
use crate::isbn;
use crate::model::{Book, BookUpdate};

/// Progress of a bulk import, one event per ISBN.
#[derive(Debug, Clone)]
pub enum ImportEvent {
    Added { book: Book, source: EnrichmentSource },
    AlreadyPresent(String),
    Failed { isbn: String, reason: String },
}

/// Catalog facade used by the CLI.
#[derive(Clone)]
pub struct Library {
    store: Arc<dyn BookStore>,
    enrichment: Arc<EnrichmentService>,
    enrich_timeout: Duration,
    import_concurrency: usize,
}

impl Library {
    pub fn new(store: Arc<dyn BookStore>, enrichment: EnrichmentService) -> Self {
        Self {
            store,
            enrichment: Arc::new(enrichment),
            enrich_timeout: Duration::from_secs(60),
            import_concurrency: 4,
        }
    }

    /// Open the SQLite library and wire the enrichment service from config.
    ///
    /// `database` overrides the configured database path.
    pub async fn open(config: &Config, database: Option<&Path>) -> crate::error::Result<Self> {
        let url = db::db_url(database.or(config.library.database.as_deref()));
        let pool = db::init_db(&url)
            .await
            .with_context(format!("opening {}", url))?;

        let store: Arc<dyn BookStore> = Arc::new(SqliteBookStore::new(pool));
        let enrichment = EnrichmentService::new(EnrichmentConfig::from(config), store.clone());

        Ok(Self::new(store, enrichment)
            .with_enrich_timeout(config.sources.enrich_timeout())
            .with_import_concurrency(config.library.import_concurrency))
    }

    /// Deadline for a whole enrichment
    pub fn with_enrich_timeout(mut self, timeout: Duration) -> Self {
        self.enrich_timeout = timeout;
        self
    }

    /// How many ISBNs an import enriches at once
    pub fn with_import_concurrency(mut self, concurrency: usize) -> Self {
        self.import_concurrency = concurrency.max(1);
        self
    }

    /// Enrich a new ISBN from the external sources and save it.
    pub async fn add_from_isbn(
        &self,
        raw_isbn: &str,
        language: Option<&str>,
    ) -> Result<Enrichment, CatalogError> {
        self.within_deadline(raw_isbn, self.enrichment.enrich_with_language(raw_isbn, language))
            .await
    }

    /// Build the record an `add` would produce, without saving anything.
    pub async fn lookup(
        &self,
        raw_isbn: &str,
        language: Option<&str>,
    ) -> Result<Enrichment, CatalogError> {
        self.within_deadline(raw_isbn, self.enrichment.preview(raw_isbn, language))
            .await
    }

    async fn within_deadline(
        &self,
        raw_isbn: &str,
        operation: impl Future<Output = Result<Enrichment, CatalogError>>,
    ) -> Result<Enrichment, CatalogError> {
        tokio::time::timeout(self.enrich_timeout, operation)
            .await
            .map_err(|_| {
                tracing::warn!(isbn = raw_isbn, "Enrichment timed out");
                CatalogError::Timeout {
                    isbn: isbn::normalize(raw_isbn),
                    secs: self.enrich_timeout.as_secs(),
                }
            })?
    }

    /// Save a book entered by hand.
    ///
    /// Unset fields become empty (page count 0); text fields are capitalized.
    pub async fn create_manual(&self, draft: BookUpdate) -> Result<Book, CatalogError> {
        let isbn = required_isbn(draft.isbn.as_deref())?;

        if self.store.exists(&isbn).await? {
            return Err(CatalogError::AlreadyExists(isbn));
        }

        let book = Book {
            isbn,
            ..draft.into_book()
        }
        .normalized();

        if !self.store.insert(&book).await? {
            return Err(CatalogError::AlreadyExists(book.isbn));
        }
        tracing::info!(isbn = %book.isbn, "Created \"{}\" manually", book.title);
        Ok(book)
    }

    /// Apply a partial update to a stored book.
    ///
    /// Set fields overwrite, unset fields are kept; the result is re-capitalized.
    pub async fn update(&self, changes: BookUpdate) -> Result<Book, CatalogError> {
        let isbn = required_isbn(changes.isbn.as_deref())?;

        let existing = self
            .store
            .find_by_isbn(&isbn)
            .await?
            .ok_or_else(|| CatalogError::NotInLibrary(isbn.clone()))?;

        let updated = existing
            .merge(BookUpdate {
                isbn: None,
                ..changes
            })
            .normalized();

        self.store.save(&updated).await?;
        tracing::info!(isbn = %updated.isbn, "Updated \"{}\"", updated.title);
        Ok(updated)
    }

    pub async fn get(&self, raw_isbn: &str) -> Result<Book, CatalogError> {
        let isbn = parse_isbn(raw_isbn)?.into_string();
        self.store
            .find_by_isbn(&isbn)
            .await?
            .ok_or(CatalogError::NotInLibrary(isbn))
    }

    pub async fn delete(&self, raw_isbn: &str) -> Result<(), CatalogError> {
        let isbn = parse_isbn(raw_isbn)?.into_string();
        if !self.store.delete_by_isbn(&isbn).await? {
            return Err(CatalogError::NotInLibrary(isbn));
        }
        tracing::info!(%isbn, "Deleted book");
        Ok(())
    }

    /// Books matching the query (title, else author, else genre), by title.
    pub async fn search(&self, query: &BookQuery) -> Result<Vec<Book>, CatalogError> {
        Ok(self.store.search(query).await?)
    }

    /// Enrich many ISBNs concurrently, yielding one event per distinct ISBN.
    ///
    /// Duplicates (after hyphen stripping) are enriched once.
    pub fn import(&self, isbns: Vec<String>) -> impl Stream<Item = ImportEvent> {
        let mut seen = std::collections::HashSet::new();
        let unique: Vec<String> = isbns
            .into_iter()
            .filter(|raw| seen.insert(isbn::normalize(raw)))
            .collect();

        let library = self.clone();
        let concurrency = self.import_concurrency;

        futures::stream::iter(unique)
            .map(move |raw| {
                let library = library.clone();
                async move {
                    match library.add_from_isbn(&raw, None).await {
                        Ok(enrichment) => ImportEvent::Added {
                            book: enrichment.book,
                            source: enrichment.source,
                        },
                        Err(CatalogError::AlreadyExists(isbn)) => ImportEvent::AlreadyPresent(isbn),
                        Err(e) => ImportEvent::Failed {
                            isbn: raw,
                            reason: e.to_string(),
                        },
                    }
                }
            })
            .buffer_unordered(concurrency)
    }
}

/// Read an ISBN list: one per line, blank lines and `#` comments skipped.
pub fn read_isbn_list(path: &Path) -> crate::error::Result<Vec<String>> {
    let contents =
        std::fs::read_to_string(path).with_context(format!("reading {}", path.display()))?;
    Ok(parse_isbn_list(&contents))
}

fn parse_isbn_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn required_isbn(raw: Option<&str>) -> Result<String, CatalogError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(CatalogError::MissingIsbn)?;
    Ok(parse_isbn(raw)?.into_string())
}

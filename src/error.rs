//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`CatalogError`]: Caller-visible outcomes of catalog operations
//!   (bad ISBN, conflicts, lookups that found nothing)
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors (e.g., [`EnrichmentError`]) for detailed handling
//!
//! [`EnrichmentError`]: crate::enrichment::EnrichmentError
//!
//! # Example
//!
//! ```ignore
//! use book_minder::error::{Result, ResultExt};
//!
//! fn read_list(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_context("reading ISBN list")
//! }
//! ```

use crate::isbn::IsbnError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by enrichment and catalog operations.
///
/// Absorbed failures (language detection, translation, author resolution)
/// never appear here; see [`crate::enrichment::Degradation`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The ISBN failed format or checksum validation
    #[error("Invalid ISBN '{isbn}': {reason}")]
    InvalidIsbn { isbn: String, reason: IsbnError },

    /// A manual record or update carried no ISBN
    #[error("ISBN is required")]
    MissingIsbn,

    /// A book with this ISBN is already in the library
    #[error("Book with ISBN {0} already exists")]
    AlreadyExists(String),

    /// Neither bibliographic source knows this ISBN
    #[error("No source has a book with ISBN {0}")]
    NotFoundAnywhere(String),

    /// The library has no book with this ISBN
    #[error("Book with ISBN {0} is not in the library")]
    NotInLibrary(String),

    /// Store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The whole enrichment exceeded its deadline
    #[error("Enrichment of ISBN {isbn} timed out after {secs}s")]
    Timeout { isbn: String, secs: u64 },
}

impl CatalogError {
    /// Create an invalid-ISBN error.
    pub fn invalid_isbn(isbn: impl Into<String>, reason: IsbnError) -> Self {
        Self::InvalidIsbn {
            isbn: isbn.into(),
            reason,
        }
    }
}

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Catalog operation error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Database(e).context(ctx))
    }
}

//! Internal domain models for book lookup and enrichment.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All external API responses get converted into these types via adapters.

use crate::model::Book;

/// Result of asking one bibliographic source about an ISBN.
///
/// "No such book" is an ordinary outcome, not an error, so the orchestrator
/// can branch on it explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome<T> {
    /// The source knows the book
    Found(T),
    /// The source answered but has no match
    NotFound,
    /// The source could not be reached or its answer could not be read
    TransientError(String),
}

impl<T> LookupOutcome<T> {
    /// Fold a client result into an outcome. `Ok(None)` and
    /// [`EnrichmentError::NotFound`] both mean "no match".
    pub fn from_result(result: Result<Option<T>, EnrichmentError>) -> Self {
        match result {
            Ok(Some(value)) => Self::Found(value),
            Ok(None) | Err(EnrichmentError::NotFound) => Self::NotFound,
            Err(e) => Self::TransientError(e.to_string()),
        }
    }
}

/// Author information as a source delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthorName {
    /// The author's name, ready to use
    Literal(String),
    /// A path that must be resolved to a name (e.g. `/authors/OL23919A`)
    Reference(String),
    #[default]
    Unknown,
}

/// Book fields extracted from one source, before author resolution,
/// translation and capitalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookCandidate {
    /// ISBN reported by the source (may be empty)
    pub isbn: String,
    pub title: String,
    pub author: AuthorName,
    pub genre: String,
    /// Already cleaned by the adapter
    pub description: String,
    pub language: String,
    pub page_count: u32,
    pub publisher: String,
    pub published_year: String,
}

impl BookCandidate {
    /// Turn the candidate into a record using an already-resolved author name.
    pub fn into_book(self, author: String) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title,
            author,
            genre: self.genre,
            description: self.description,
            language: self.language,
            page_count: self.page_count,
            publisher: self.publisher,
            published_year: self.published_year,
        }
    }
}

/// Source of enrichment data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentSource {
    GoogleBooks,
    OpenLibrary,
}

impl std::fmt::Display for EnrichmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::GoogleBooks => "Google Books",
            Self::OpenLibrary => "Open Library",
        };
        f.write_str(name)
    }
}

/// A failure the pipeline absorbed instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Degradation {
    #[error("language detection failed: {0}")]
    LanguageDetection(String),

    #[error("translation failed: {0}")]
    Translation(String),

    #[error("author resolution failed: {0}")]
    AuthorResolution(String),
}

/// A completed enrichment: the record plus how it was obtained.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub book: Book,
    pub source: EnrichmentSource,
    /// Whether the description was translated
    pub translated: bool,
    /// Absorbed failures, in the order they happened
    pub degradations: Vec<Degradation>,
}

/// Errors that can occur while talking to an external service
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No match found")]
    NotFound,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

//! Open Library API Data Transfer Objects
//!
//! These types match EXACTLY what the Open Library API returns.
//! DO NOT use these types outside the openlibrary module - convert to domain types.
//!
//! API Reference: https://openlibrary.org/dev/docs/api/books
//!
//! Endpoints used:
//! - `GET /isbn/<isbn>.json` (an edition record)
//! - `GET /authors/<id>.json` (an author record)

use serde::{Deserialize, Serialize};

/// An edition, as returned by `/isbn/<isbn>.json`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EditionResponse {
    pub title: Option<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    /// References only; names need a second request
    #[serde(default)]
    pub authors: Vec<KeyRef>,
    /// e.g. `[{"key": "/languages/eng"}]`
    #[serde(default)]
    pub languages: Vec<KeyRef>,
    #[serde(default)]
    pub isbn_13: Vec<String>,
    #[serde(default)]
    pub isbn_10: Vec<String>,
    /// Free-form ("1987", "March 1987", "Oct 12, 2004")
    pub publish_date: Option<String>,
    pub number_of_pages: Option<i64>,
}

/// `{"key": "/type/id"}` link to another Open Library record
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeyRef {
    pub key: String,
}

/// An author, as returned by `/authors/<id>.json`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthorResponse {
    pub key: Option<String>,
    pub name: Option<String>,
    pub personal_name: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================

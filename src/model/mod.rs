//! Core data models for the book catalog.
//!
//! [`Book`] is the canonical record: produced by the enrichment pipeline,
//! persisted by the store, and handed back to callers. [`BookUpdate`] carries
//! partial changes (every field optional) for manual creation and updates.
//!
//! # Database Schema
//!
//! `Book` maps one-to-one onto the `books` table; `isbn` is the primary key.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::text;

/// A book in the personal library.
///
/// String fields are never null: unknown values are empty strings and an
/// unknown page count is `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Hyphen-stripped ISBN-10 or ISBN-13 (unique key)
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    /// 2-3 letter language code, uppercase
    pub language: String,
    /// 0 when unknown
    pub page_count: u32,
    pub publisher: String,
    /// Four-digit year or empty
    pub published_year: String,
}

/// Partial book data; `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub page_count: Option<u32>,
    pub publisher: Option<String>,
    pub published_year: Option<String>,
}

impl Book {
    /// Apply the text-normalization rules to every field.
    ///
    /// - `language`: uppercased
    /// - `author`: name-aware capitalization
    /// - `title`, `genre`, `publisher`: every word capitalized
    /// - `description`, `isbn`, `published_year`: untouched
    ///
    /// Blank fields are left exactly as they are.
    pub fn normalized(self) -> Book {
        Book {
            title: unless_blank(self.title, text::capitalize_fully),
            author: unless_blank(self.author, text::capitalize_author_name),
            genre: unless_blank(self.genre, text::capitalize_fully),
            language: unless_blank(self.language, |s| s.to_uppercase()),
            publisher: unless_blank(self.publisher, text::capitalize_fully),
            ..self
        }
    }

    /// Shallow, null-preserving merge: every `Some` in `changes` overwrites the
    /// matching field, every `None` keeps the current value.
    pub fn merge(self, changes: BookUpdate) -> Book {
        Book {
            isbn: changes.isbn.unwrap_or(self.isbn),
            title: changes.title.unwrap_or(self.title),
            author: changes.author.unwrap_or(self.author),
            genre: changes.genre.unwrap_or(self.genre),
            description: changes.description.unwrap_or(self.description),
            language: changes.language.unwrap_or(self.language),
            page_count: changes.page_count.unwrap_or(self.page_count),
            publisher: changes.publisher.unwrap_or(self.publisher),
            published_year: changes.published_year.unwrap_or(self.published_year),
        }
    }
}

impl BookUpdate {
    /// Build a full record, filling unset fields with empty values.
    pub fn into_book(self) -> Book {
        Book::default().merge(self)
    }
}

fn unless_blank(value: String, f: impl FnOnce(&str) -> String) -> String {
    if value.trim().is_empty() {
        value
    } else {
        f(&value)
    }
}

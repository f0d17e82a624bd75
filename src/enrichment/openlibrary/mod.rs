//! Open Library API integration (secondary source)
//!
//! Queried only when Google Books has no match. Editions reference their
//! authors by key, so a second request resolves the name.
//!
//! API docs: https://openlibrary.org/dev/docs/api/books

pub mod dto;
mod adapter;
mod client;

pub use adapter::{extract_author, extract_isbn, extract_language, to_candidate};
pub use client::{DEFAULT_BASE_URL, OpenLibraryClient};

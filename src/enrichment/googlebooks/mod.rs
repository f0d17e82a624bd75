//! Google Books API integration (primary source)
//!
//! Searches volumes by ISBN and yields rich metadata, including the
//! description and categories.
//!
//! API docs: https://developers.google.com/books/docs/v1/reference/volumes

pub mod dto;
mod adapter;
mod client;

pub use adapter::{extract_genre, extract_isbn, extract_language, to_candidate};
pub use client::{DEFAULT_BASE_URL, GoogleBooksClient};

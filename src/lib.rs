//! Book Minder - a personal library catalog.
//!
//! Give it an ISBN and it builds a complete, consistently formatted book
//! record from Google Books (falling back to Open Library), translating the
//! description into the book's language when needed, and stores it in a
//! local SQLite database.
//!
//! - [`isbn`]: ISBN-10/13 parsing and checksum validation
//! - [`enrichment`]: source clients and the lookup pipeline
//! - [`text`]: capitalization and description cleanup
//! - [`library`]: catalog operations over a [`db::BookStore`]

pub mod cli;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod isbn;
pub mod library;
pub mod model;
#[cfg(test)]
pub mod test_utils;
pub mod text;

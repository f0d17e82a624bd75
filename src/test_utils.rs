//! Test utilities and fixtures for book-minder tests.
//!
//! This module provides common test helpers, mock factories, and
//! database utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use book_minder::test_utils::{temp_db, mock_book};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let book = mock_book();
//!     // ... test logic
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::db::{BookQuery, BookStore};
use crate::enrichment::domain::{AuthorName, BookCandidate};
use crate::model::Book;

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Creates a normalized Book with sensible defaults.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let book = Book {
///     title: "Custom Title".to_string(),
///     ..mock_book()
/// };
/// ```
pub fn mock_book() -> Book {
    Book {
        isbn: "9780743273565".to_string(),
        title: "The Great Gatsby".to_string(),
        author: "F. Scott Fitzgerald".to_string(),
        genre: "Fiction".to_string(),
        description: "A novel of the Jazz Age.".to_string(),
        language: "EN".to_string(),
        page_count: 180,
        publisher: "Scribner".to_string(),
        published_year: "1925".to_string(),
    }
}

/// A raw Google Books candidate, before capitalization.
pub fn google_candidate() -> BookCandidate {
    BookCandidate {
        isbn: "9780306406157".to_string(),
        title: "the art of electronics".to_string(),
        author: AuthorName::Literal("paul horowitz".to_string()),
        genre: "Science and Technology".to_string(),
        description: "The classic guide to circuit design.".to_string(),
        language: "EN".to_string(),
        page_count: 1125,
        publisher: "cambridge university press".to_string(),
        published_year: "1989".to_string(),
    }
}

/// A raw Open Library candidate: author by reference, no genre or description.
pub fn open_library_candidate() -> BookCandidate {
    BookCandidate {
        isbn: "9780306406157".to_string(),
        title: "the art of electronics".to_string(),
        author: AuthorName::Reference("/authors/OL2657217A".to_string()),
        genre: String::new(),
        description: String::new(),
        language: "ENG".to_string(),
        page_count: 1125,
        publisher: "Cambridge University Press".to_string(),
        published_year: "1989".to_string(),
    }
}

/// In-memory [`BookStore`] that counts writes.
#[derive(Default)]
pub struct MemoryStore {
    books: Mutex<BTreeMap<String, Book>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `books`.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let store = Self::default();
        store
            .books
            .lock()
            .extend(books.into_iter().map(|b| (b.isbn.clone(), b)));
        store
    }

    /// Number of writes (`save` calls and successful `insert`s) so far
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.books.lock().len()
    }

    pub fn get(&self, isbn: &str) -> Option<Book> {
        self.books.lock().get(isbn).cloned()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn exists(&self, isbn: &str) -> sqlx::Result<bool> {
        Ok(self.books.lock().contains_key(isbn))
    }

    async fn insert(&self, book: &Book) -> sqlx::Result<bool> {
        let mut books = self.books.lock();
        if books.contains_key(&book.isbn) {
            return Ok(false);
        }
        books.insert(book.isbn.clone(), book.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn save(&self, book: &Book) -> sqlx::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.books.lock().insert(book.isbn.clone(), book.clone());
        Ok(())
    }

    async fn find_by_isbn(&self, isbn: &str) -> sqlx::Result<Option<Book>> {
        Ok(self.get(isbn))
    }

    async fn delete_by_isbn(&self, isbn: &str) -> sqlx::Result<bool> {
        Ok(self.books.lock().remove(isbn).is_some())
    }

    async fn search(&self, query: &BookQuery) -> sqlx::Result<Vec<Book>> {
        let mut found: Vec<Book> = self
            .books
            .lock()
            .values()
            .filter(|b| query.matches(b))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_book_is_valid() {
        let book = mock_book();
        assert!(crate::isbn::is_valid(&book.isbn));
        assert_eq!(book.clone().normalized(), book);
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let book = mock_book();

        store.save(&book).await.unwrap();

        assert!(store.exists(&book.isbn).await.unwrap());
        assert_eq!(store.saves(), 1);
        assert!(store.delete_by_isbn(&book.isbn).await.unwrap());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_memory_store_insert_keeps_existing() {
        let book = mock_book();
        let store = MemoryStore::with_books([book.clone()]);

        let other = Book {
            title: "Replacement".to_string(),
            ..book.clone()
        };
        assert!(!store.insert(&other).await.unwrap());
        assert_eq!(store.get(&book.isbn), Some(book));
        assert_eq!(store.saves(), 0);
    }
}

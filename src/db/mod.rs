//! Database module for book persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! The enrichment pipeline and the catalog talk to storage only through the
//! [`BookStore`] trait, so tests can swap in an in-memory store.
//!
//! # Example
//!
//! ```ignore
//! use book_minder::db::{init_db, BookStore, SqliteBookStore};
//!
//! let pool = init_db("sqlite:book_minder.db").await?;
//! let store = SqliteBookStore::new(pool);
//! let book = store.find_by_isbn("9780306406157").await?;
//! ```

use async_trait::async_trait;
use sqlx::Sqlite;
use sqlx::migrate::MigrateDatabase;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqlitePoolOptions};

use crate::model::Book;

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "book_minder.db";

const BOOK_COLUMNS: &str =
    "isbn, title, author, genre, description, language, page_count, publisher, published_year";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, and runs all pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Field a search filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Genre,
}

/// Search criteria. Only the highest-priority non-blank criterion is used:
/// title, then author, then genre.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

impl BookQuery {
    /// The criterion that applies, or `None` to list everything.
    pub fn criterion(&self) -> Option<(SearchField, &str)> {
        fn non_blank(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }

        non_blank(&self.title)
            .map(|t| (SearchField::Title, t))
            .or_else(|| non_blank(&self.author).map(|a| (SearchField::Author, a)))
            .or_else(|| non_blank(&self.genre).map(|g| (SearchField::Genre, g)))
    }

    /// Case-insensitive substring match against the applicable criterion.
    ///
    /// Case folding is Unicode-aware, so "ÉMILE" matches "émile".
    pub fn matches(&self, book: &Book) -> bool {
        let Some((field, needle)) = self.criterion() else {
            return true;
        };
        let haystack = match field {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
            SearchField::Genre => &book.genre,
        };
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Persistence operations the catalog needs.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Whether a book with this (hyphen-stripped) ISBN is stored.
    async fn exists(&self, isbn: &str) -> sqlx::Result<bool>;

    /// Insert a new book. Returns `false` without writing anything if a book
    /// with the same ISBN is already stored.
    async fn insert(&self, book: &Book) -> sqlx::Result<bool>;

    /// Insert or replace a book.
    async fn save(&self, book: &Book) -> sqlx::Result<()>;

    async fn find_by_isbn(&self, isbn: &str) -> sqlx::Result<Option<Book>>;

    /// Delete a book. Returns whether a row was removed.
    async fn delete_by_isbn(&self, isbn: &str) -> sqlx::Result<bool>;

    /// Books matching [`BookQuery::matches`], ordered by title.
    async fn search(&self, query: &BookQuery) -> sqlx::Result<Vec<Book>>;
}

/// [`BookStore`] backed by the SQLite `books` table.
#[derive(Clone)]
pub struct SqliteBookStore {
    pool: SqlitePool,
}

impl SqliteBookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn bind_book<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    book: &'q Book,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.description)
        .bind(&book.language)
        .bind(book.page_count)
        .bind(&book.publisher)
        .bind(&book.published_year)
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn exists(&self, isbn: &str) -> sqlx::Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM books WHERE isbn = ?")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn insert(&self, book: &Book) -> sqlx::Result<bool> {
        let sql = format!(
            "INSERT INTO books ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) ON CONFLICT(isbn) DO NOTHING",
            BOOK_COLUMNS
        );
        let result = bind_book(sqlx::query(&sql), book)
            .execute(&self.pool)
            .await?;

        let inserted = result.rows_affected() > 0;
        tracing::debug!(isbn = %book.isbn, inserted, "Inserted book");
        Ok(inserted)
    }

    async fn save(&self, book: &Book) -> sqlx::Result<()> {
        let query = sqlx::query(
            r#"
            INSERT INTO books (isbn, title, author, genre, description, language, page_count, publisher, published_year)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(isbn) DO UPDATE SET
                title = excluded.title,
                author = excluded.author,
                genre = excluded.genre,
                description = excluded.description,
                language = excluded.language,
                page_count = excluded.page_count,
                publisher = excluded.publisher,
                published_year = excluded.published_year
            "#,
        );
        bind_book(query, book).execute(&self.pool).await?;

        tracing::debug!(isbn = %book.isbn, "Saved book");
        Ok(())
    }

    async fn find_by_isbn(&self, isbn: &str) -> sqlx::Result<Option<Book>> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE isbn = ?", BOOK_COLUMNS))
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_by_isbn(&self, isbn: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = ?")
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &BookQuery) -> sqlx::Result<Vec<Book>> {
        // SQLite's LOWER() and LIKE only fold ASCII, so filtering happens here
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY title",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books.into_iter().filter(|b| query.matches(b)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_book, temp_db};

    #[tokio::test]
    async fn test_init_db_creates_database() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite:{}", db_path.display());

        let pool = init_db(&db_url).await.expect("Failed to init db");
        assert!(db_path.exists());

        // Verify we can query the table
        let books = SqliteBookStore::new(pool)
            .search(&BookQuery::default())
            .await
            .expect("Failed to query books");
        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteBookStore::new(pool);
        let book = mock_book();

        assert!(!store.exists(&book.isbn).await.unwrap());
        store.save(&book).await.unwrap();
        assert!(store.exists(&book.isbn).await.unwrap());

        let found = store.find_by_isbn(&book.isbn).await.unwrap();
        assert_eq!(found, Some(book));
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteBookStore::new(pool);
        let book = mock_book();
        store.save(&book).await.unwrap();

        let changed = Book {
            page_count: 999,
            ..book.clone()
        };
        store.save(&changed).await.unwrap();

        let found = store.find_by_isbn(&book.isbn).await.unwrap().unwrap();
        assert_eq!(found.page_count, 999);
    }

    #[tokio::test]
    async fn test_insert_never_overwrites() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteBookStore::new(pool);
        let book = mock_book();

        assert!(store.insert(&book).await.unwrap());

        let other = Book {
            title: "Someone Else's Book".to_string(),
            ..book.clone()
        };
        assert!(!store.insert(&other).await.unwrap());

        let found = store.find_by_isbn(&book.isbn).await.unwrap();
        assert_eq!(found, Some(book));
    }

    #[tokio::test]
    async fn test_delete() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteBookStore::new(pool);
        let book = mock_book();
        store.save(&book).await.unwrap();

        assert!(store.delete_by_isbn(&book.isbn).await.unwrap());
        assert!(!store.delete_by_isbn(&book.isbn).await.unwrap());
        assert!(store.find_by_isbn(&book.isbn).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_priority_and_order() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteBookStore::new(pool);

        let dune = Book {
            isbn: "9780441172719".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            ..Default::default()
        };
        let children = Book {
            isbn: "9780441104024".to_string(),
            title: "Children Of Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            ..Default::default()
        };
        let emma = Book {
            isbn: "9780141439587".to_string(),
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            genre: "Romance".to_string(),
            ..Default::default()
        };
        for book in [&dune, &children, &emma] {
            store.save(book).await.unwrap();
        }

        let by_title = store
            .search(&BookQuery {
                title: Some("dune".to_string()),
                author: Some("Austen".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let titles: Vec<_> = by_title.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Children Of Dune", "Dune"]);

        let by_genre = store
            .search(&BookQuery {
                genre: Some("romance".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_genre, vec![emma.clone()]);

        let all = store.search(&BookQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].title, "Emma");
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteBookStore::new(pool);
        store.save(&mock_book()).await.unwrap();

        let found = store
            .search(&BookQuery {
                title: Some("%".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let (pool, _dir) = temp_db().await;
        let store = SqliteBookStore::new(pool);
        let book = Book {
            title: "LES MISÉRABLES".to_string(),
            ..mock_book()
        };
        store.save(&book).await.unwrap();

        let query = BookQuery {
            title: Some("misérables".to_string()),
            ..Default::default()
        };
        assert_eq!(store.search(&query).await.unwrap(), vec![book.clone()]);
        assert!(query.matches(&book));
    }

    #[test]
    fn test_query_criterion_priority() {
        let query = BookQuery {
            title: Some("  ".to_string()),
            author: Some("herbert".to_string()),
            genre: Some("fiction".to_string()),
        };
        assert_eq!(query.criterion(), Some((SearchField::Author, "herbert")));
        assert_eq!(BookQuery::default().criterion(), None);
    }

    #[test]
    fn test_query_matches() {
        let query = BookQuery {
            genre: Some("FICTION".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&mock_book()));
        assert!(BookQuery::default().matches(&mock_book()));
    }

    #[test]
    fn test_db_url() {
        assert_eq!(db_url(None), "sqlite:book_minder.db");
        assert_eq!(
            db_url(Some(std::path::Path::new("/tmp/books.db"))),
            "sqlite:/tmp/books.db"
        );
    }
}

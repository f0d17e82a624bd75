//! Adapter layer: Convert Open Library DTOs to domain models
//!
//! Open Library editions carry no genre or description, and authors only as
//! references; the service resolves those separately.

use super::dto;
use crate::enrichment::domain::{AuthorName, BookCandidate};
use crate::enrichment::extract;

/// Convert an edition into a candidate.
pub fn to_candidate(edition: dto::EditionResponse) -> BookCandidate {
    BookCandidate {
        isbn: extract_isbn(&edition),
        title: edition.title.clone().unwrap_or_default(),
        author: extract_author(&edition.authors),
        genre: String::new(),
        description: String::new(),
        language: extract_language(&edition.languages),
        page_count: extract::page_count(edition.number_of_pages),
        publisher: extract::first_or_empty(&edition.publishers),
        published_year: extract::published_year(edition.publish_date.as_deref()),
    }
}

/// First ISBN-13, else first ISBN-10, else empty.
pub fn extract_isbn(edition: &dto::EditionResponse) -> String {
    edition
        .isbn_13
        .first()
        .or_else(|| edition.isbn_10.first())
        .cloned()
        .unwrap_or_else(|| {
            tracing::warn!("No ISBN found in Open Library edition, relying on search ISBN");
            String::new()
        })
}

/// Reference to the first listed author.
pub fn extract_author(authors: &[dto::KeyRef]) -> AuthorName {
    match authors.first() {
        Some(author) if !author.key.trim().is_empty() => AuthorName::Reference(author.key.clone()),
        _ => AuthorName::Unknown,
    }
}

/// Trailing segment of the first language key, first three letters uppercased
/// ("/languages/eng" -> "ENG").
pub fn extract_language(languages: &[dto::KeyRef]) -> String {
    let Some(language) = languages.first() else {
        return String::new();
    };
    let code = language.key.rsplit('/').next().unwrap_or_default();
    code.chars().take(3).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> dto::KeyRef {
        dto::KeyRef {
            key: value.to_string(),
        }
    }

    fn make_edition() -> dto::EditionResponse {
        dto::EditionResponse {
            title: Some("dune".to_string()),
            publishers: vec!["Ace Books".to_string(), "Chilton".to_string()],
            authors: vec![key("/authors/OL79034A")],
            languages: vec![key("/languages/eng")],
            isbn_13: vec!["9780441172719".to_string()],
            isbn_10: vec!["0441172717".to_string()],
            publish_date: Some("September 1990".to_string()),
            number_of_pages: Some(535),
        }
    }

    #[test]
    fn test_convert_full_edition() {
        let candidate = to_candidate(make_edition());

        assert_eq!(candidate.isbn, "9780441172719");
        assert_eq!(candidate.title, "dune");
        assert_eq!(
            candidate.author,
            AuthorName::Reference("/authors/OL79034A".to_string())
        );
        assert_eq!(candidate.language, "ENG");
        assert_eq!(candidate.publisher, "Ace Books");
        assert_eq!(candidate.page_count, 535);
        assert_eq!(candidate.published_year, "1990");
    }

    #[test]
    fn test_never_supplies_genre_or_description() {
        let candidate = to_candidate(make_edition());
        assert_eq!(candidate.genre, "");
        assert_eq!(candidate.description, "");
    }

    #[test]
    fn test_isbn10_fallback() {
        let edition = dto::EditionResponse {
            isbn_13: vec![],
            ..make_edition()
        };
        assert_eq!(extract_isbn(&edition), "0441172717");
        assert_eq!(extract_isbn(&dto::EditionResponse::default()), "");
    }

    #[test]
    fn test_empty_edition() {
        let candidate = to_candidate(dto::EditionResponse::default());

        assert_eq!(candidate.author, AuthorName::Unknown);
        assert_eq!(candidate.language, "");
        assert_eq!(candidate.publisher, "");
        assert_eq!(candidate.page_count, 0);
        assert_eq!(candidate.published_year, "");
    }

    #[test]
    fn test_language_code_is_truncated() {
        assert_eq!(extract_language(&[key("/languages/fre")]), "FRE");
        assert_eq!(extract_language(&[key("/languages/english")]), "ENG");
        assert_eq!(extract_language(&[key("/languages/pt")]), "PT");
    }
}

//! Adapter layer: Convert Google Books DTOs to domain models
//!
//! This is the ONLY place where Google Books DTO types are converted to domain
//! types. If the API changes its response format, only this file and dto.rs
//! need to change.

use super::dto;
use crate::enrichment::domain::{AuthorName, BookCandidate};
use crate::enrichment::extract;
use crate::text;

/// Convert a search response into a candidate from its first volume.
///
/// Returns `None` when the response has no items. `totalItems` is not
/// consulted: it is sometimes missing even when items are present.
pub fn to_candidate(response: dto::VolumesResponse) -> Option<BookCandidate> {
    let volume = response.items.into_iter().next()?;
    Some(volume_to_candidate(volume.volume_info))
}

fn volume_to_candidate(info: dto::VolumeInfo) -> BookCandidate {
    let author = match extract::first_or_empty(&info.authors) {
        name if name.is_empty() => AuthorName::Unknown,
        name => AuthorName::Literal(name),
    };

    BookCandidate {
        isbn: extract_isbn(&info.industry_identifiers),
        title: info.title.clone().unwrap_or_default(),
        author,
        genre: extract_genre(&info),
        description: text::clean_description(info.description.as_deref().unwrap_or_default()),
        language: extract_language(info.language.as_deref()),
        page_count: extract::page_count(info.page_count),
        publisher: info.publisher.clone().unwrap_or_default(),
        published_year: extract::published_year(info.published_date.as_deref()),
    }
}

/// ISBN-13 if present, else ISBN-10, else empty.
pub fn extract_isbn(identifiers: &[dto::IndustryIdentifier]) -> String {
    let find = |kind: &str| {
        identifiers
            .iter()
            .find(|id| id.kind == kind)
            .map(|id| id.identifier.clone())
    };

    find("ISBN_13").or_else(|| find("ISBN_10")).unwrap_or_else(|| {
        tracing::warn!("No ISBN found in industry identifiers, relying on search ISBN");
        String::new()
    })
}

/// Main category if non-blank, else the first category, with `&` spelled out.
pub fn extract_genre(info: &dto::VolumeInfo) -> String {
    let genre = info
        .main_category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| info.categories.first().map(String::as_str))
        .unwrap_or_default();

    genre.replace('&', "and")
}

/// Primary language subtag, uppercased ("pt-BR" -> "PT").
pub fn extract_language(language: Option<&str>) -> String {
    let Some(tag) = language.map(str::trim).filter(|t| !t.is_empty()) else {
        return String::new();
    };
    tag.chars().take(2).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_info() -> dto::VolumeInfo {
        dto::VolumeInfo {
            title: Some("The Pragmatic Programmer".to_string()),
            authors: vec!["David Thomas".to_string(), "Andrew Hunt".to_string()],
            publisher: Some("Addison-Wesley".to_string()),
            published_date: Some("2019-09-13".to_string()),
            description: Some("  A classic.   Copyright 2019 Pearson".to_string()),
            industry_identifiers: vec![
                identifier("ISBN_10", "0135957052"),
                identifier("ISBN_13", "9780135957059"),
            ],
            page_count: Some(352),
            categories: vec!["Computers".to_string()],
            language: Some("en".to_string()),
            ..Default::default()
        }
    }

    fn identifier(kind: &str, value: &str) -> dto::IndustryIdentifier {
        dto::IndustryIdentifier {
            kind: kind.to_string(),
            identifier: value.to_string(),
        }
    }

    fn response_with(info: dto::VolumeInfo) -> dto::VolumesResponse {
        dto::VolumesResponse {
            kind: None,
            total_items: 1,
            items: vec![dto::Volume {
                id: None,
                volume_info: info,
            }],
        }
    }

    #[test]
    fn test_convert_full_volume() {
        let candidate = to_candidate(response_with(make_info())).unwrap();

        assert_eq!(candidate.isbn, "9780135957059");
        assert_eq!(candidate.title, "The Pragmatic Programmer");
        assert_eq!(candidate.author, AuthorName::Literal("David Thomas".to_string()));
        assert_eq!(candidate.genre, "Computers");
        assert_eq!(candidate.description, "A classic.");
        assert_eq!(candidate.language, "EN");
        assert_eq!(candidate.page_count, 352);
        assert_eq!(candidate.publisher, "Addison-Wesley");
        assert_eq!(candidate.published_year, "2019");
    }

    #[test]
    fn test_no_items_is_none() {
        let response = dto::VolumesResponse {
            kind: None,
            total_items: 0,
            items: vec![],
        };
        assert!(to_candidate(response).is_none());
    }

    #[test]
    fn test_items_without_total_count() {
        let body = r#"{"items": [{"volumeInfo": {"title": "Dune"}}]}"#;
        let response: dto::VolumesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_items, 0);

        let candidate = to_candidate(response).unwrap();
        assert_eq!(candidate.title, "Dune");
    }

    #[test]
    fn test_sparse_volume_defaults() {
        let candidate = to_candidate(response_with(dto::VolumeInfo::default())).unwrap();

        assert_eq!(candidate.isbn, "");
        assert_eq!(candidate.title, "");
        assert_eq!(candidate.author, AuthorName::Unknown);
        assert_eq!(candidate.description, "");
        assert_eq!(candidate.page_count, 0);
    }

    #[test]
    fn test_isbn_prefers_13_then_10() {
        assert_eq!(
            extract_isbn(&[identifier("ISBN_10", "0135957052")]),
            "0135957052"
        );
        assert_eq!(extract_isbn(&[identifier("OTHER", "UCSC:32106")]), "");
    }

    #[test]
    fn test_genre_main_category_wins() {
        let info = dto::VolumeInfo {
            main_category: Some("Science Fiction".to_string()),
            categories: vec!["Adventure".to_string(), "Fantasy".to_string()],
            ..Default::default()
        };
        assert_eq!(extract_genre(&info), "Science Fiction");
    }

    #[test]
    fn test_genre_blank_main_category_falls_back() {
        let info = dto::VolumeInfo {
            main_category: Some("  ".to_string()),
            categories: vec!["Adventure".to_string()],
            ..Default::default()
        };
        assert_eq!(extract_genre(&info), "Adventure");
    }

    #[test]
    fn test_genre_empty_and_ampersand() {
        assert_eq!(extract_genre(&dto::VolumeInfo::default()), "");

        let info = dto::VolumeInfo {
            main_category: Some("Science & Technology".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_genre(&info), "Science and Technology");
    }

    #[test]
    fn test_language() {
        assert_eq!(extract_language(Some("en")), "EN");
        assert_eq!(extract_language(Some("pt-BR")), "PT");
        assert_eq!(extract_language(Some("")), "");
        assert_eq!(extract_language(None), "");
    }
}

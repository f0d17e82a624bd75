//! Google Books API Data Transfer Objects
//!
//! These types match EXACTLY what the Google Books API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the googlebooks module - convert to domain types.
//!
//! API Reference: https://developers.google.com/books/docs/v1/reference/volumes
//!
//! We only use `GET /books/v1/volumes?q=isbn:<isbn>`.

use serde::{Deserialize, Serialize};

/// Volume search response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    /// Resource type ("books#volumes")
    pub kind: Option<String>,
    /// Number of matches; absent on some empty responses
    #[serde(default)]
    pub total_items: u32,
    /// Matching volumes (omitted entirely when there are none)
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// A single volume
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: Option<String>,
    pub volume_info: VolumeInfo,
}

/// Bibliographic data for a volume
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    /// Free-form date ("2004", "2004-05", "2004-05-01")
    pub published_date: Option<String>,
    /// May contain HTML-free but messy marketing text
    pub description: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    pub page_count: Option<i64>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub main_category: Option<String>,
    /// BCP-47 tag ("en", "pt-BR")
    pub language: Option<String>,
}

/// `{type, identifier}` pair
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndustryIdentifier {
    /// "ISBN_10", "ISBN_13", "ISSN" or "OTHER"
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

/// Error envelope returned with 4xx/5xx statuses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub code: Option<u16>,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

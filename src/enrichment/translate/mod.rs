//! LibreTranslate integration
//!
//! Detects the language of a description and translates it into the book's
//! own language when they differ.

pub mod dto;
mod client;

pub use client::{DEFAULT_BASE_URL, TranslateClient};

/// Placeholder language used when detection is not possible
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Whether a description in `detected` needs translating into `book_language`.
///
/// False when detection failed or either side is blank; comparison ignores case.
pub fn is_translation_required(detected: &str, book_language: &str) -> bool {
    let detected = detected.trim();
    let book_language = book_language.trim();

    !detected.is_empty()
        && !book_language.is_empty()
        && detected != UNKNOWN_LANGUAGE
        && !detected.eq_ignore_ascii_case(book_language)
}

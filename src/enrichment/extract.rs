//! Field extraction rules shared by every source adapter.

use std::sync::LazyLock;

use regex::Regex;

static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{4})\b").expect("valid year regex"));

/// Page count if positive, otherwise 0 (unknown).
pub fn page_count(raw: Option<i64>) -> u32 {
    raw.filter(|&n| n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

/// First standalone four-digit run in a free-form date string.
///
/// Handles "2023-10-01", "2023" and "March 5, 1999". Returns an empty string
/// if there is none.
pub fn published_year(raw: Option<&str>) -> String {
    let Some(date) = raw.filter(|d| !d.trim().is_empty()) else {
        return String::new();
    };

    RE_YEAR
        .captures(date)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// First entry of a list, or empty.
pub fn first_or_empty(values: &[String]) -> String {
    values.first().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(Some(320)), 320);
        assert_eq!(page_count(Some(0)), 0);
        assert_eq!(page_count(Some(-4)), 0);
        assert_eq!(page_count(None), 0);
    }

    #[test]
    fn test_published_year_iso_date() {
        assert_eq!(published_year(Some("2023-10-01")), "2023");
        assert_eq!(published_year(Some("2023")), "2023");
    }

    #[test]
    fn test_published_year_free_text() {
        assert_eq!(published_year(Some("March 5, 1999")), "1999");
        assert_eq!(published_year(Some("Oct 12 2004")), "2004");
    }

    #[test]
    fn test_published_year_missing() {
        assert_eq!(published_year(Some("October 202")), "");
        assert_eq!(published_year(Some("   ")), "");
        assert_eq!(published_year(None), "");
    }

    #[test]
    fn test_published_year_ascii_digits_only() {
        assert_eq!(published_year(Some("\u{0662}\u{0660}\u{0662}\u{0663}")), "");
        assert_eq!(published_year(Some("\u{0662}\u{0660}\u{0662}\u{0663} / 2023")), "2023");
    }

    #[test]
    fn test_first_or_empty() {
        assert_eq!(first_or_empty(&["a".to_string(), "b".to_string()]), "a");
        assert_eq!(first_or_empty(&[]), "");
    }
}

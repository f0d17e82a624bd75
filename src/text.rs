//! Text normalization for book records.
//!
//! - [`capitalize_fully`]: every whitespace-separated word gets an uppercase
//!   first letter and lowercase rest (titles, genres, publishers).
//! - [`capitalize_author_name`]: name-aware capitalization (initials,
//!   hyphenated names, lowercase particles, `Mc`/`Mac` prefixes).
//! - [`clean_description`]: strips trailing copyright notices and review
//!   attributions and tidies whitespace, quotes and ellipses.

use std::sync::LazyLock;

use regex::Regex;

/// Name particles kept lowercase unless they open the name.
const NAME_PARTICLES: &[&str] = &[
    "de", "da", "di", "van", "von", "le", "la", "du", "del", "dos", "das",
];

static RE_INITIALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\p{L}\.)+$").expect("valid initials regex"));
static RE_SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,;:!?])").expect("valid punctuation regex"));
static RE_SPACED_ELLIPSIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s\.\s\.").expect("valid ellipsis regex"));
static RE_DOT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("valid dot-run regex"));

/// Capitalize the first letter of every word and lowercase the rest.
///
/// Whitespace is preserved as-is; blank input comes back unchanged.
pub fn capitalize_fully(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;

    for c in value.chars() {
        if c.is_whitespace() {
            result.push(c);
            at_word_start = true;
        } else if at_word_start {
            result.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }

    result
}

/// Capitalize a person's name.
///
/// ```ignore
/// assert_eq!(capitalize_author_name("j.k. rowling"), "J.K. Rowling");
/// assert_eq!(capitalize_author_name("ludwig van beethoven"), "Ludwig van Beethoven");
/// assert_eq!(capitalize_author_name("ian macdonald"), "Ian MacDonald");
/// ```
pub fn capitalize_author_name(name: &str) -> String {
    name.trim()
        .split(' ')
        .enumerate()
        .map(|(index, token)| {
            if RE_INITIALS.is_match(token) {
                token.to_uppercase()
            } else {
                token
                    .split('-')
                    .map(|part| capitalize_name_part(part, index == 0))
                    .collect::<Vec<_>>()
                    .join("-")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_name_part(part: &str, first_token: bool) -> String {
    let lower = part.to_lowercase();
    if !first_token && NAME_PARTICLES.contains(&lower.as_str()) {
        return lower;
    }

    let capitalized = capitalize_fully(part);
    if let Some(rest) = strip_prefix_before_letter(&lower, "mc") {
        return format!("Mc{}", capitalize_fully(rest));
    }
    if let Some(rest) = strip_prefix_before_letter(&lower, "mac") {
        return format!("Mac{}", capitalize_fully(rest));
    }
    capitalized
}

/// Strip `prefix` if what follows starts with an ASCII letter.
fn strip_prefix_before_letter<'a>(lower: &'a str, prefix: &str) -> Option<&'a str> {
    lower
        .strip_prefix(prefix)
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_lowercase()))
}

/// Clean up a description from a bibliographic source.
///
/// Steps, in order:
/// 1. Remove straight and curly double quotes.
/// 2. Collapse whitespace runs to one space and trim.
/// 3. Cut at the first case-insensitive "copyright".
/// 4. Drop whitespace before `. , ; : ! ?`.
/// 5. Turn `. . .` and bare `..` into `...`.
/// 6. Cut at the first en dash or em dash.
///
/// Quotes go before whitespace collapsing so that removing a free-standing
/// quote cannot leave a double space behind; this keeps the function idempotent.
pub fn clean_description(description: &str) -> String {
    if description.trim().is_empty() {
        return String::new();
    }

    let unquoted: String = description
        .chars()
        .filter(|c| !matches!(c, '"' | '\u{201C}' | '\u{201D}'))
        .collect();

    let mut cleaned = unquoted.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(index) = find_ascii_case_insensitive(&cleaned, "copyright") {
        cleaned.truncate(index);
        cleaned = cleaned.trim_end().to_string();
    }

    cleaned = RE_SPACE_BEFORE_PUNCT.replace_all(&cleaned, "$1").into_owned();

    cleaned = RE_SPACED_ELLIPSIS.replace_all(&cleaned, "...").into_owned();
    cleaned = RE_DOT_RUN
        .replace_all(&cleaned, |caps: &regex::Captures| {
            // Only a bare pair becomes an ellipsis; longer runs stay as written
            if &caps[0] == ".." {
                "...".to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned();

    if let Some(index) = cleaned.find(['\u{2013}', '\u{2014}']) {
        cleaned.truncate(index);
    }

    cleaned.trim().to_string()
}

/// Byte offset of the first ASCII case-insensitive match of `needle`.
fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

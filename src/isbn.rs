//! ISBN parsing and checksum validation.
//!
//! Accepts ISBN-10 and ISBN-13 with or without hyphens. The hyphen-stripped
//! form returned here is the one representation used everywhere else
//! (existence checks, store keys, source queries).
//!
//! - ISBN-10: `Σ digit[i] × (i+1)` for the first nine digits, mod 11, must
//!   equal the last character (`X` counts as 10).
//! - ISBN-13: `(10 − (Σ digit[i] × (1 | 3)) mod 10) mod 10` over the first
//!   twelve digits must equal the last digit.

use std::fmt;

/// Which ISBN flavour a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsbnKind {
    Isbn10,
    Isbn13,
}

/// Why an ISBN was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IsbnError {
    #[error("ISBN is empty")]
    Empty,

    #[error("ISBN must have 10 or 13 digits, got {0}")]
    InvalidLength(usize),

    #[error("Invalid character {found:?} at position {position}")]
    InvalidCharacter { position: usize, found: char },

    #[error("Checksum mismatch: expected {expected}, got {found}")]
    ChecksumMismatch { expected: u32, found: u32 },
}

/// A checksum-valid, hyphen-stripped ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// Parse and validate a raw ISBN string.
    pub fn parse(raw: &str) -> Result<Self, IsbnError> {
        let normalized = normalize(raw);
        check(&normalized)?;
        Ok(Self(normalized))
    }

    /// The hyphen-stripped digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> IsbnKind {
        if self.0.len() == 10 {
            IsbnKind::Isbn10
        } else {
            IsbnKind::Isbn13
        }
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip hyphens (and surrounding whitespace) from a raw ISBN.
pub fn normalize(raw: &str) -> String {
    raw.trim().chars().filter(|&c| c != '-').collect()
}

/// Validate a raw ISBN, returning the hyphen-stripped form and whether it passed.
pub fn validate(raw: &str) -> (String, bool) {
    let normalized = normalize(raw);
    let valid = check(&normalized).is_ok();
    (normalized, valid)
}

/// Convenience wrapper around [`validate`].
pub fn is_valid(raw: &str) -> bool {
    validate(raw).1
}

/// Compute the ISBN-10 check value (0..=10) from the first nine digits.
///
/// Returns `None` if the input is shorter than nine characters or any of the
/// first nine is not an ASCII digit.
pub fn isbn10_check_value(isbn: &str) -> Option<u32> {
    let digits = leading_digits(isbn, 9)?;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (i as u32 + 1))
        .sum();
    Some(sum % 11)
}

/// Compute the ISBN-13 check digit from the first twelve digits.
pub fn isbn13_check_digit(isbn: &str) -> Option<u32> {
    let digits = leading_digits(isbn, 12)?;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    Some((10 - sum % 10) % 10)
}

fn leading_digits(isbn: &str, count: usize) -> Option<Vec<u32>> {
    let digits: Vec<u32> = isbn.chars().take(count).map(|c| c.to_digit(10)).collect::<Option<_>>()?;
    (digits.len() == count).then_some(digits)
}

fn check(isbn: &str) -> Result<(), IsbnError> {
    if isbn.is_empty() {
        return Err(IsbnError::Empty);
    }

    let chars: Vec<char> = isbn.chars().collect();
    let len = chars.len();
    if len != 10 && len != 13 {
        return Err(IsbnError::InvalidLength(len));
    }

    // Everything but the final character must be a digit
    if let Some((position, &found)) = chars[..len - 1]
        .iter()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(IsbnError::InvalidCharacter { position, found });
    }

    let last = chars[len - 1];
    let found = match (len, last) {
        (10, 'X') => 10,
        (_, c) => c.to_digit(10).ok_or(IsbnError::InvalidCharacter {
            position: len - 1,
            found: c,
        })?,
    };

    let expected = if len == 10 {
        isbn10_check_value(isbn)
    } else {
        isbn13_check_digit(isbn)
    }
    .ok_or(IsbnError::InvalidLength(len))?;

    tracing::debug!("ISBN-{} check digit: {}, last digit: {}", len, expected, found);

    if expected == found {
        Ok(())
    } else {
        Err(IsbnError::ChecksumMismatch { expected, found })
    }
}

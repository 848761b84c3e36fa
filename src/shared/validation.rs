use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::AppError;

lazy_static! {
    /// Regex for validating slugs
    /// - Valid: "bar-e-ristoranti", "negozi_2", "Musei"
    /// - Invalid: "bar e ristoranti", "città", ""
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap();

    /// Two upper-case letters, e.g. "PI", "TN"
    pub static ref PROVINCE_CODE_REGEX: Regex = Regex::new(r"^[A-Z]{2}$").unwrap();

    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^\w\s-]").unwrap();
}

/// Turn a display name into a URL slug.
///
/// Punctuation is dropped first so "dell'arte" stays one word, then the
/// text is transliterated to lower-case ASCII with runs of anything else
/// collapsed into a single hyphen.
pub fn slugify(value: &str) -> String {
    let cleaned = NON_SLUG_CHARS.replace_all(value, "");
    slug::slugify(cleaned)
}

/// Build an ILIKE pattern matching `term` as a literal substring.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Numeric id from a path segment; anything else is a not-found.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound(format!("No record with id '{}'", raw)));
    }
    raw.parse::<i64>()
        .map_err(|_| AppError::NotFound(format!("No record with id '{}'", raw)))
}

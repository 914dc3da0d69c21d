use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches every character that is not an ASCII digit. Phone numbers are
    /// compared after stripping separators, so "010-1234-5678" and
    /// "01012345678" are the same number.
    pub static ref NON_DIGIT_REGEX: Regex = Regex::new(r"[^0-9]").unwrap();
}

/// Reduce a phone number to its digits.
pub fn normalize_phone(raw: &str) -> String {
    NON_DIGIT_REGEX.replace_all(raw, "").into_owned()
}

/// Canonical form for name comparison: trimmed and lowercased.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True when the value is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

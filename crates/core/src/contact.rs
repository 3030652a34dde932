//! Normalisation and checks for user contact fields (mobil, epost).

use std::sync::LazyLock;

use regex::Regex;

/// Norwegian mobile number: optional country prefix, then 8 digits starting 4-9.
static MOBIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+47|0047|47)?[4-9]\d{7}$").expect("valid mobil regex"));

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whether `mobil` is a Norwegian mobile number, ignoring whitespace.
pub fn is_valid_mobil(mobil: &str) -> bool {
    MOBIL_PATTERN.is_match(&strip_whitespace(mobil))
}

/// Bring a mobile number to the stored `+47XXXXXXXX` form.
///
/// Unrecognised shapes are returned unchanged.
pub fn normalize_mobil(mobil: &str) -> String {
    let cleaned = strip_whitespace(mobil);
    if cleaned.starts_with("+47") {
        cleaned
    } else if let Some(rest) = cleaned.strip_prefix("0047") {
        format!("+47{rest}")
    } else if cleaned.starts_with("47") && cleaned.len() == 10 {
        format!("+{cleaned}")
    } else if cleaned.len() == 8 {
        format!("+47{cleaned}")
    } else {
        mobil.to_string()
    }
}

/// E-mail addresses are compared and stored trimmed and lowercased.
pub fn normalize_epost(epost: &str) -> String {
    epost.trim().to_lowercase()
}

//! Internal helpers for text normalization.
//!
//! These utilities are **not** part of the public API.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Trim and collapse inner whitespace; `None` when nothing is left.
pub(crate) fn normalize_display(input: &str) -> Option<String> {
    let mut out = String::new();
    for token in input.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    if out.is_empty() { None } else { Some(out) }
}

/// Folding key for case/accent-insensitive matching.
///
/// NFKD-decomposes, drops combining marks and lowercases, so `Fóod` and
/// `FOOD` both fold to `food`.
pub(crate) fn fold_key(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        out.extend(ch.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_collapses_whitespace() {
        assert_eq!(normalize_display("  Office   supplies "), Some("Office supplies".to_string()));
        assert_eq!(normalize_display(" \t "), None);
    }

    #[test]
    fn fold_key_ignores_case_and_accents() {
        assert_eq!(fold_key("Fóod"), "food");
        assert_eq!(fold_key("TRAVEL"), "travel");
    }
}

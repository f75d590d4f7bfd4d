//! Bracketed-placeholder substitution
//!
//! Templates embed tokens like `[TENANT_NAME]` in free text. Resolution is a
//! single left-to-right pass over non-overlapping matches; values are looked
//! up by the whitespace-trimmed interior of the token. Keys absent from the
//! value map leave the original token in place so partially filled templates
//! degrade gracefully instead of erroring.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Placeholder key -> replacement value. Keys are case-sensitive.
pub type PlaceholderValues = HashMap<String, String>;

lazy_static! {
    // First `]` after a `[` closes the token; nested brackets unsupported.
    static ref PLACEHOLDER: Regex = Regex::new(r"\[([^\]]+)\]").unwrap();
}

/// Substitute placeholder tokens in `text` with entries from `values`.
///
/// Inserted values are never re-scanned, so cyclic data cannot cause
/// runaway substitution. An unmatched `[` is treated as literal text.
pub fn resolve(text: &str, values: &PlaceholderValues) -> String {
    if text.is_empty() {
        return String::new();
    }

    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            let key = caps[1].trim();
            match values.get(key) {
                Some(value) => value.clone(),
                // Pass-through: keep the original bracketed token.
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Ordered, de-duplicated placeholder keys found in `text`.
///
/// Drives the fill-in form for a template: one input per key, in the order
/// the keys first appear.
pub fn placeholder_keys(text: &str) -> Vec<String> {
    let mut keys = Vec::new();
    for caps in PLACEHOLDER.captures_iter(text) {
        let key = caps[1].trim().to_string();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn values(pairs: &[(&str, &str)]) -> PlaceholderValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_single_token() {
        let result = resolve("Pay $[RENT] monthly", &values(&[("RENT", "1200")]));
        assert_eq!(result, "Pay $1200 monthly");
    }

    #[test]
    fn test_resolve_trims_interior_whitespace() {
        let vals = values(&[("TENANT_NAME", "Ada Lovelace")]);
        assert_eq!(resolve("[ TENANT_NAME ]", &vals), "Ada Lovelace");
        assert_eq!(resolve("[TENANT_NAME]", &vals), "Ada Lovelace");
    }

    #[test]
    fn test_resolve_missing_key_passes_through() {
        let result = resolve("[UNKNOWN]", &PlaceholderValues::new());
        assert_eq!(result, "[UNKNOWN]");
    }

    #[test]
    fn test_resolve_empty_input() {
        assert_eq!(resolve("", &values(&[("K", "v")])), "");
    }

    #[test]
    fn test_resolve_keys_are_case_sensitive() {
        let vals = values(&[("RENT", "1200")]);
        assert_eq!(resolve("[rent]", &vals), "[rent]");
        assert_eq!(resolve("[RENT]", &vals), "1200");
    }

    #[test]
    fn test_resolve_unclosed_bracket_is_literal() {
        let vals = values(&[("RENT", "1200")]);
        assert_eq!(resolve("Pay $[RENT monthly", &vals), "Pay $[RENT monthly");
    }

    #[test]
    fn test_resolve_first_close_ends_token() {
        // "[A[B]" -> the token interior is "A[B" which has no value,
        // so the whole match stays literal.
        let vals = values(&[("B", "x")]);
        assert_eq!(resolve("[A[B]", &vals), "[A[B]");
    }

    #[test]
    fn test_resolve_no_recursive_substitution() {
        // The inserted value contains a token that also has a mapping;
        // it must not be resolved again.
        let vals = values(&[("A", "[B]"), ("B", "oops")]);
        assert_eq!(resolve("[A]", &vals), "[B]");
    }

    #[test]
    fn test_resolve_multiple_tokens_in_order() {
        let vals = values(&[("LANDLORD_NAME", "Acme LLC"), ("TENANT_NAME", "Ada")]);
        assert_eq!(
            resolve("Between [LANDLORD_NAME] and [TENANT_NAME].", &vals),
            "Between Acme LLC and Ada."
        );
    }

    #[test]
    fn test_placeholder_keys_ordered_and_deduplicated() {
        let keys = placeholder_keys("[B] then [A] then [ B ] again");
        assert_eq!(keys, vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_placeholder_keys_empty_text() {
        assert!(placeholder_keys("").is_empty());
        assert!(placeholder_keys("no tokens here").is_empty());
    }

    proptest! {
        /// Texts with no bracketed substrings resolve to themselves.
        #[test]
        fn bracket_free_text_is_unchanged(text in "[^\\[\\]]{0,200}") {
            let vals = values(&[("RENT", "1200"), ("X", "y")]);
            prop_assert_eq!(resolve(&text, &vals), text);
        }

        /// A present key in a bare token is replaced exactly once.
        #[test]
        fn present_key_replaced_exactly_once(
            key in "[A-Z_]{1,20}",
            value in "[a-zA-Z0-9 ]{0,40}",
        ) {
            let vals = values(&[(key.as_str(), value.as_str())]);
            let text = format!("[{}]", key);
            prop_assert_eq!(resolve(&text, &vals), value);
        }

        /// Resolution is deterministic for identical inputs.
        #[test]
        fn resolve_is_deterministic(text in ".{0,200}") {
            let vals = values(&[("RENT", "1200")]);
            prop_assert_eq!(resolve(&text, &vals), resolve(&text, &vals));
        }
    }
}

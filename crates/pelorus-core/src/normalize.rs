//! # Name Normalization
//!
//! Canonical form for entity names. Every comparison in the stack —
//! sanctions lookups, approval matching, cache keys — goes through
//! [`normalized_name`] so that `"ACME  Shipping"` and `"acme shipping"`
//! are the same counterparty everywhere.
//!
//! The canonical form is: Unicode NFKC, trimmed, internal whitespace
//! collapsed to single spaces, lowercased. Nothing fuzzier than that:
//! fuzzy matching is explicitly out of scope.

use unicode_normalization::UnicodeNormalization;

/// Normalize an entity name for comparison.
pub fn normalized_name(raw: &str) -> String {
    let composed: String = raw.nfkc().collect();
    composed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether two raw names refer to the same entity under normalization.
pub fn names_match(a: &str, b: &str) -> bool {
    normalized_name(a) == normalized_name(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalized_name("  Acme   Shipping  Co "), "acme shipping co");
    }

    #[test]
    fn case_folds() {
        assert!(names_match("KALININ MACHINE PLANT JSC", "Kalinin Machine Plant JSC"));
    }

    #[test]
    fn nfkc_compatibility_forms() {
        // Fullwidth latin and the ﬁ ligature decompose under NFKC.
        assert_eq!(normalized_name("ＡＣＭＥ"), "acme");
        assert_eq!(normalized_name("ﬁnance"), "finance");
    }

    #[test]
    fn empty_is_empty() {
        assert_eq!(normalized_name(""), "");
        assert_eq!(normalized_name("   "), "");
    }

    proptest! {
        #[test]
        fn idempotent(name in ".{0,64}") {
            let once = normalized_name(&name);
            prop_assert_eq!(normalized_name(&once), once);
        }

        #[test]
        fn insensitive_to_surrounding_whitespace(name in "[a-zA-Z ]{0,32}") {
            let padded = format!("  {name}\t");
            prop_assert_eq!(normalized_name(&padded), normalized_name(&name));
        }
    }
}

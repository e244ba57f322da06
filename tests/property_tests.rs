//! Property-based tests for the fixture harness
//!
//! These tests use proptest to verify the trim and truncation laws across
//! many randomly generated inputs, catching edge cases that hand-written
//! tests might miss.

use fixtest::{trim_trailing_newlines, truncate_for_display};
use proptest::prelude::*;

proptest! {
    /// Property: trimming removes every trailing \n/\r and nothing else.
    #[test]
    fn trim_strips_all_trailing_newlines(
        body in "[a-zA-Z0-9 àé→]{0,40}",
        tail in proptest::collection::vec(prop_oneof![Just('\n'), Just('\r')], 0..6),
    ) {
        let mut s = body.clone();
        s.extend(tail);
        let trimmed = trim_trailing_newlines(&s);
        prop_assert!(!trimmed.ends_with(['\n', '\r']));
        prop_assert_eq!(trimmed, body.trim_end_matches(['\n', '\r']));
    }

    /// Property: trimming is idempotent.
    #[test]
    fn trim_is_idempotent(s in "\\PC*") {
        let once = trim_trailing_newlines(&s);
        prop_assert_eq!(trim_trailing_newlines(once), once);
    }

    /// Property: trimming never touches leading or embedded newlines.
    #[test]
    fn trim_preserves_embedded_newlines(
        first in "[a-z]{1,10}",
        second in "[a-z]{1,10}",
    ) {
        let s = format!("\n{first}\n{second}\n");
        prop_assert_eq!(trim_trailing_newlines(&s), format!("\n{first}\n{second}"));
    }

    /// Property: values at or under the cap pass through unmodified.
    #[test]
    fn truncation_leaves_short_values_alone(s in "\\PC{0,10}") {
        prop_assume!(s.len() <= 40);
        prop_assert_eq!(truncate_for_display(&s, 40), s.as_str());
    }

    /// Property: long values are cut to at most cap + marker bytes, end
    /// with the marker, and remain a prefix of the original.
    #[test]
    fn truncation_cuts_and_marks_long_values(s in "\\PC{31,120}", cap in 1usize..30) {
        prop_assume!(s.len() > cap);
        let shown = truncate_for_display(&s, cap);
        prop_assert!(shown.ends_with(".."));
        let prefix = &shown[..shown.len() - 2];
        prop_assert!(prefix.len() <= cap);
        prop_assert!(s.starts_with(prefix));
    }
}

//! Property-based tests for content line folding.

use icu::properties::CodePointMapData;
use icu::properties::props::{GeneralCategory, GeneralCategoryGroup};
use kunai_rfc::rfc::ical::build::{MAX_LINE_OCTETS, fold_line, fold_line_with_indent};
use proptest::prelude::*;

fn is_mark(c: char) -> bool {
    GeneralCategoryGroup::Mark.contains(CodePointMapData::<GeneralCategory>::new().get(c))
}

fn unfold(folded: &str, indent: &str) -> String {
    folded.replace(&format!("\r\n{indent}"), "")
}

/// Text mixing ASCII, multi-byte letters and combining marks.
fn unicode_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 ,;:]{1,8}",
            "[äöüßéèçñ]{1,4}",
            "[日本語中文한국어]{1,3}",
            "[a-z][\u{0300}-\u{036F}]{1,3}",
            "[😀🎉🚀]{1,2}",
        ],
        1..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn short_lines_are_unchanged(line in "[ -~]{0,75}") {
        prop_assert_eq!(&*fold_line(&line), line.as_str());
    }

    #[test]
    fn short_unicode_lines_are_unchanged(line in unicode_text()) {
        prop_assume!(line.len() <= MAX_LINE_OCTETS);
        prop_assert_eq!(&*fold_line(&line), line.as_str());
    }

    #[test]
    fn ascii_lines_are_exactly_full(line in "[ -~]{76,400}") {
        let folded = fold_line(&line);
        let physical: Vec<&str> = folded.split("\r\n").collect();
        let (last, full) = physical.split_last().unwrap();
        for l in full {
            prop_assert_eq!(l.len(), MAX_LINE_OCTETS);
        }
        prop_assert!(!last.is_empty() && last.len() <= MAX_LINE_OCTETS);
        prop_assert_eq!(unfold(&folded, " "), line);
    }

    #[test]
    fn tab_indent_round_trips(line in "[ -~]{76,300}") {
        let folded = fold_line_with_indent(&line, "\t");
        for l in folded.split("\r\n").skip(1) {
            prop_assert!(l.starts_with('\t'));
        }
        prop_assert_eq!(unfold(&folded, "\t"), line);
    }

    #[test]
    fn unicode_lines_fit_and_round_trip(line in unicode_text()) {
        let folded = fold_line(&line);
        for l in folded.split("\r\n") {
            prop_assert!(l.len() <= MAX_LINE_OCTETS);
        }
        prop_assert_eq!(unfold(&folded, " "), line);
    }

    #[test]
    fn marks_never_start_a_continuation(line in unicode_text()) {
        let folded = fold_line(&line);
        for l in folded.split("\r\n").skip(1) {
            let first = l.strip_prefix(' ').and_then(|rest| rest.chars().next());
            prop_assert!(first.is_some_and(|c| !is_mark(c)), "{:?}", l);
        }
    }
}

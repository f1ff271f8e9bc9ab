//! Content line folding for iCalendar (RFC 5545 §3.1).

use std::borrow::Cow;

use icu::properties::CodePointMapData;
use icu::properties::props::{GeneralCategory, GeneralCategoryGroup};

/// Maximum line length in octets (not including CRLF).
pub const MAX_LINE_OCTETS: usize = 75;

/// Whitespace that starts every continuation line unless configured otherwise.
pub const DEFAULT_FOLD_INDENT: &str = " ";

/// Folds a content line to the 75-octet limit using a single space as the
/// continuation indent.
///
/// The result carries no trailing CRLF. Lines that already fit are returned
/// borrowed.
#[must_use]
pub fn fold_line(line: &str) -> Cow<'_, str> {
    fold_line_with_indent(line, DEFAULT_FOLD_INDENT)
}

/// Folds a content line, starting every continuation line with `indent`.
///
/// The indent counts against the 75-octet budget of its line. Non-ASCII
/// input is only broken between grapheme clusters, so a combining mark always
/// stays on the line of its base character. A cluster that alone exceeds the
/// budget is never split and occupies an over-length line of its own.
#[must_use]
pub fn fold_line_with_indent<'a>(line: &'a str, indent: &str) -> Cow<'a, str> {
    if line.len() <= MAX_LINE_OCTETS {
        return Cow::Borrowed(line);
    }

    if line.is_ascii() {
        Cow::Owned(fold_ascii(line, indent))
    } else {
        Cow::Owned(fold_clusters(line, indent))
    }
}

fn continuation_budget(indent: &str) -> usize {
    MAX_LINE_OCTETS.saturating_sub(indent.len()).max(1)
}

fn fold_ascii(line: &str, indent: &str) -> String {
    let bytes = line.len();
    let budget = continuation_budget(indent);
    let mut out = String::with_capacity(bytes + (bytes / budget + 1) * (2 + indent.len()));

    // ASCII only, so every byte index is a char boundary.
    let (first, mut rest) = line.split_at(MAX_LINE_OCTETS);
    out.push_str(first);
    while !rest.is_empty() {
        let (chunk, tail) = rest.split_at(budget.min(rest.len()));
        out.push_str("\r\n");
        out.push_str(indent);
        out.push_str(chunk);
        rest = tail;
    }
    out
}

fn fold_clusters(line: &str, indent: &str) -> String {
    let mut out = String::with_capacity(line.len() + (line.len() / 32) * (2 + indent.len()));
    let mut line_len = 0;
    let mut line_has_cluster = false;

    for cluster in grapheme_clusters(line) {
        if line_has_cluster && line_len + cluster.len() > MAX_LINE_OCTETS {
            out.push_str("\r\n");
            out.push_str(indent);
            line_len = indent.len();
            line_has_cluster = false;
        }
        if !line_has_cluster && line_len + cluster.len() > MAX_LINE_OCTETS {
            tracing::debug!(
                cluster_len = cluster.len(),
                "Grapheme cluster exceeds line limit, emitting over-length line"
            );
        }
        out.push_str(cluster);
        line_len += cluster.len();
        line_has_cluster = true;
    }
    out
}

/// Splits `s` into clusters of one base character followed by its combining
/// marks (General_Category = Mark). Marks before the first base character
/// join the first cluster.
fn grapheme_clusters(s: &str) -> Vec<&str> {
    let categories = CodePointMapData::<GeneralCategory>::new();
    let mut clusters = Vec::new();
    let mut start = 0;
    let mut seen_base = false;

    for (i, c) in s.char_indices() {
        if GeneralCategoryGroup::Mark.contains(categories.get(c)) {
            continue;
        }
        if seen_base {
            clusters.push(&s[start..i]);
            start = i;
        }
        seen_base = true;
    }
    if start < s.len() {
        clusters.push(&s[start..]);
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physical_lines(folded: &str) -> Vec<&str> {
        folded.split("\r\n").collect()
    }

    #[test]
    fn short_line_is_borrowed() {
        let line = "SUMMARY:Short";
        assert!(matches!(fold_line(line), Cow::Borrowed(l) if l == line));
        let exact = "X".repeat(75);
        assert!(matches!(fold_line(&exact), Cow::Borrowed(_)));
    }

    #[test]
    fn ascii_lines_are_full() {
        let line = "A".repeat(200);
        let folded = fold_line(&line);
        let lines = physical_lines(&folded);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 75);
        assert_eq!(lines[1].len(), 75);
        assert!(lines[1].starts_with(' '));
        assert_eq!(lines[2].len(), 1 + 200 - 75 - 74);
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn tab_indent() {
        let line = "B".repeat(80);
        let folded = fold_line_with_indent(&line, "\t");
        assert_eq!(folded, format!("{}\r\n\t{}", "B".repeat(75), "B".repeat(5)));
    }

    #[test]
    fn multibyte_is_not_split() {
        let line = format!("{}日本語", "A".repeat(73));
        let folded = fold_line(&line);
        for l in physical_lines(&folded) {
            assert!(l.len() <= MAX_LINE_OCTETS);
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
        assert_eq!(physical_lines(&folded)[0], "A".repeat(73));
    }

    #[test]
    fn combining_mark_stays_with_base() {
        // "e" + COMBINING ACUTE ACCENT straddling the limit.
        let line = format!("{}e\u{0301}tail", "A".repeat(73));
        let folded = fold_line(&line);
        let lines = physical_lines(&folded);
        assert_eq!(lines[0], "A".repeat(73));
        assert!(lines[1].starts_with(" e\u{0301}"));
    }

    #[test]
    fn leading_marks_join_first_cluster() {
        assert_eq!(grapheme_clusters("\u{0301}ab"), vec!["\u{0301}a", "b"]);
        assert_eq!(grapheme_clusters("a\u{0301}\u{0302}b"), vec!["a\u{0301}\u{0302}", "b"]);
    }

    #[test]
    fn oversized_cluster_gets_own_line() {
        let huge = format!("x{}", "\u{0301}".repeat(40));
        let line = format!("AB{huge}CD");
        let folded = fold_line(&line);
        let lines = physical_lines(&folded);
        let middle = format!(" {huge}");
        assert_eq!(lines, vec!["AB", middle.as_str(), " CD"]);
    }
}

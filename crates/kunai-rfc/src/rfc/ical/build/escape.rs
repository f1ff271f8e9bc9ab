//! TEXT and parameter-value escaping.

use std::borrow::Cow;

/// Escapes a TEXT value (RFC 5545 §3.3.11).
///
/// Backslash, comma and semicolon are backslash-escaped; line breaks (`\n`,
/// `\r\n` or a lone `\r`) become `\n`.
#[must_use]
pub fn escape_text(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', ',', ';', '\n', '\r']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str("\\n");
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Formats a parameter value, quoting it when it contains `:`, `;` or `,`
/// and caret-encoding what a quoted string cannot hold (RFC 6868).
#[must_use]
pub fn escape_param_value(s: &str) -> Cow<'_, str> {
    if !s.contains([':', ';', ',', '"', '^', '\n', '\r']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 4);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '^' => out.push_str("^^"),
            '"' => out.push_str("^'"),
            '\n' => out.push_str("^n"),
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str("^n");
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_text("Event 0"), Cow::Borrowed("Event 0")));
        assert!(matches!(escape_param_value("Alice"), Cow::Borrowed(_)));
    }

    #[test]
    fn text_specials() {
        assert_eq!(escape_text("a, b; c\\d"), "a\\, b\\; c\\\\d");
        assert_eq!(escape_text("one\r\ntwo\nthree\rfour"), "one\\ntwo\\nthree\\nfour");
    }

    #[test]
    fn param_quoting() {
        assert_eq!(escape_param_value("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(escape_param_value("mailto:x@y"), "\"mailto:x@y\"");
        assert_eq!(escape_param_value("say \"hi\""), "\"say ^'hi^'\"");
        assert_eq!(escape_param_value("a^b\r\nc"), "\"a^^b^nc\"");
    }
}

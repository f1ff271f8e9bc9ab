//! iCalendar parsing (RFC 5545).
//!
//! - Lexer: physical line splitting, unfolding and content line tokenizing
//! - Values: decoding of the scalar value types
//! - Parser: component tree construction bound to an expected kind
//! - Recovery: one retry after repairing known-bad line wrapping

mod error;
mod lexer;
mod parser;
mod recovery;
mod values;

use kunai_core::config::ParseConfig;

pub use error::{FailureClass, ParseError, ParseErrorKind, ParseResult};
pub use lexer::{ContentLine, parse_content_line, split_lines};
pub use recovery::{Attempt, normalize_bad_wrapping, with_recovery};
pub use values::{decode_value, split_text_list, unescape_text};

use crate::rfc::ical::core::{Component, ComponentKind};

/// Parsing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Retry once after [`normalize_bad_wrapping`] when the input has
    /// malformed content lines.
    pub recover_bad_wrapping: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recover_bad_wrapping: true,
        }
    }
}

impl ParseOptions {
    /// Builds options from the `parse` configuration section.
    #[must_use]
    pub const fn from_settings(config: &ParseConfig) -> Self {
        Self {
            recover_bad_wrapping: config.recover_bad_wrapping,
        }
    }
}

/// Parses every VCALENDAR in `source`.
///
/// ## Errors
/// See [`parse_as_with`].
pub fn parse(source: impl AsRef<[u8]>) -> ParseResult<Vec<Component>> {
    parse_as(ComponentKind::Calendar, source)
}

/// Parses every top-level component in `source`, each of which must be of
/// `kind`, with default options.
///
/// ## Errors
/// See [`parse_as_with`].
pub fn parse_as(kind: ComponentKind, source: impl AsRef<[u8]>) -> ParseResult<Vec<Component>> {
    parse_as_with(kind, source, &ParseOptions::default())
}

/// Parses every top-level component in `source`, each of which must be of
/// `kind`.
///
/// When the first attempt fails with a malformed-structure error and
/// recovery is enabled, the input is repaired with
/// [`normalize_bad_wrapping`] and parsed once more.
///
/// ## Errors
/// The first attempt's error when it is not recoverable or recovery is off,
/// otherwise the second attempt's error.
#[tracing::instrument(skip(source, options), fields(input_len = source.as_ref().len()))]
pub fn parse_as_with(
    kind: ComponentKind,
    source: impl AsRef<[u8]>,
    options: &ParseOptions,
) -> ParseResult<Vec<Component>> {
    let source = source.as_ref();
    let parse_once = |input: &[u8]| parser::parse_components(input, kind);

    if options.recover_bad_wrapping {
        with_recovery(source, parse_once, normalize_bad_wrapping)
    } else {
        parse_once(source)
    }
}

impl Component {
    /// Parses every top-level component of `kind` in `source`.
    ///
    /// ## Errors
    /// See [`parse_as_with`].
    pub fn parse(kind: ComponentKind, source: impl AsRef<[u8]>) -> ParseResult<Vec<Self>> {
        parse_as(kind, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPLIT_UTF8: &[u8] =
        b"BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Caf\xC3\r\n \xA9 au lait\r\nEND:VEVENT\r\n";

    #[test_log::test]
    fn recovers_fold_inside_multibyte_character() {
        let events = parse_as(ComponentKind::Event, SPLIT_UTF8).unwrap();
        assert_eq!(events[0].summary(), Some("Café au lait"));
    }

    #[test_log::test]
    fn recovery_can_be_disabled() {
        let options = ParseOptions {
            recover_bad_wrapping: false,
        };
        let err = parse_as_with(ComponentKind::Event, SPLIT_UTF8, &options).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidUtf8);
        assert_eq!(err.class(), FailureClass::MalformedStructure);
    }

    #[test]
    fn options_from_settings() {
        let config = ParseConfig {
            recover_bad_wrapping: false,
        };
        assert!(!ParseOptions::from_settings(&config).recover_bad_wrapping);
        assert!(ParseOptions::default().recover_bad_wrapping);
    }

    #[test]
    fn component_parse_entry_point() {
        let todos = Component::parse(ComponentKind::Todo, "BEGIN:VTODO\r\nEND:VTODO\r\n").unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].kind(), ComponentKind::Todo);
    }
}

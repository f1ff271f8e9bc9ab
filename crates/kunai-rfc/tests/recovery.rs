//! Recovery from badly wrapped input.

use kunai_rfc::rfc::ical::core::ComponentKind;
use kunai_rfc::rfc::ical::parse::{
    FailureClass, ParseErrorKind, ParseOptions, normalize_bad_wrapping, parse, parse_as_with,
};

/// A producer that wraps without the continuation space and also folds in
/// the middle of a multi-byte character.
const BADLY_WRAPPED: &[u8] = b"BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Broken//Producer//EN\r\n\
BEGIN:VEVENT\r\n\
UID:broken-1\r\n\
DESCRIPTION:This description was wrapped by a producer\r\n\
that forgot the leading space\r\n\
SUMMARY:Gr\xC3\r\n \xBC\xC3\x9Fe\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

const NO_RECOVERY: ParseOptions = ParseOptions {
    recover_bad_wrapping: false,
};

#[test_log::test]
fn first_attempt_fails_as_malformed() {
    let err = parse_as_with(ComponentKind::Calendar, BADLY_WRAPPED, &NO_RECOVERY).unwrap_err();
    assert_eq!(err.class(), FailureClass::MalformedStructure);
}

#[test_log::test]
fn repaired_input_parses() {
    let calendars = parse(BADLY_WRAPPED).unwrap();
    let event = &calendars[0].components_of(ComponentKind::Event)[0];
    assert_eq!(event.summary(), Some("Grüße"));
    assert_eq!(
        event.description(),
        Some("This description was wrapped by a producerthat forgot the leading space")
    );
}

#[test]
fn repair_matches_direct_parse_of_normalized_input() {
    let repaired = normalize_bad_wrapping(BADLY_WRAPPED);
    let direct = parse_as_with(ComponentKind::Calendar, &repaired, &NO_RECOVERY).unwrap();
    let recovered = parse(BADLY_WRAPPED).unwrap();
    assert_eq!(direct, recovered);
}

#[test_log::test]
fn failure_after_repair_is_surfaced() {
    // An unterminated quote is not a wrapping problem; the repair cannot
    // fix it, so the second attempt's error comes back.
    let input = b"BEGIN:VCALENDAR\r\nX-A;CN=\"open:value\r\nEND:VCALENDAR\r\n";
    let err = parse(input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnclosedQuote);
}

#[test]
fn unrecoverable_errors_are_not_repaired() {
    let input = b"BEGIN:VCALENDAR\r\nVERSION:2.0\r\n";
    let err = parse(input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingEnd);
    assert_eq!(err.class(), FailureClass::Unrecoverable);
}

#[test]
fn wrong_top_level_kind_is_unrecoverable() {
    let err = parse(b"BEGIN:VTODO\r\nEND:VTODO\r\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MismatchedComponent);
}

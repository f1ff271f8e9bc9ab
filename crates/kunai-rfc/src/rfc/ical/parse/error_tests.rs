use super::*;

const MALFORMED: [ParseErrorKind; 7] = [
    ParseErrorKind::InvalidUtf8,
    ParseErrorKind::InvalidContentLine,
    ParseErrorKind::MissingPropertyName,
    ParseErrorKind::InvalidPropertyName,
    ParseErrorKind::MissingColon,
    ParseErrorKind::InvalidParameter,
    ParseErrorKind::UnclosedQuote,
];

const UNRECOVERABLE: [ParseErrorKind; 6] = [
    ParseErrorKind::MissingBegin,
    ParseErrorKind::MissingEnd,
    ParseErrorKind::MismatchedComponent,
    ParseErrorKind::InvalidBoolean,
    ParseErrorKind::InvalidInteger,
    ParseErrorKind::InvalidFloat,
];

#[test]
fn location_without_context() {
    let error = ParseError::new(ParseErrorKind::MissingEnd, 10, 1);
    assert!(error.context.is_none());
    assert_eq!(error.to_string(), "component is never closed at line 10, column 1");
}

#[test]
fn context_is_appended() {
    let error =
        ParseError::new(ParseErrorKind::InvalidParameter, 5, 15).with_context("X-A;=b:value");
    assert_eq!(
        error.to_string(),
        "parameter is not NAME=VALUE at line 5, column 15: X-A;=b:value"
    );
}

#[test]
fn repairable_kinds() {
    for kind in MALFORMED {
        assert_eq!(kind.class(), FailureClass::MalformedStructure, "{kind:?}");
        assert!(ParseError::new(kind, 1, 1).is_malformed_structure());
    }
}

#[test]
fn terminal_kinds() {
    for kind in UNRECOVERABLE {
        assert_eq!(kind.class(), FailureClass::Unrecoverable, "{kind:?}");
        assert!(!ParseError::new(kind, 1, 1).is_malformed_structure());
    }
}

#[test]
fn boxes_as_std_error() {
    let boxed: Box<dyn std::error::Error> =
        Box::new(ParseError::new(ParseErrorKind::InvalidFloat, 2, 3));
    assert!(boxed.to_string().starts_with("not a FLOAT"));
}

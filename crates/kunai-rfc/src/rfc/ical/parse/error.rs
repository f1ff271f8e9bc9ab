//! Parse failures and their recovery class.

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// A parse failure located at a physical input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}{}", context_suffix(.context.as_deref()))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based physical line, counted before unfolding.
    pub line: usize,
    /// 1-based column; byte offset within the line for UTF-8 failures.
    pub column: usize,
    pub context: Option<String>,
}

fn context_suffix(context: Option<&str>) -> String {
    context.map(|c| format!(": {c}")).unwrap_or_default()
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    #[must_use]
    pub const fn class(&self) -> FailureClass {
        self.kind.class()
    }

    /// True when [`super::normalize_bad_wrapping`] might make the input parse.
    #[must_use]
    pub const fn is_malformed_structure(&self) -> bool {
        matches!(self.class(), FailureClass::MalformedStructure)
    }
}

/// Whether a failure is worth one repair attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Broken content-line structure: bad folds, undecodable bytes, lines
    /// without a colon, unterminated quotes.
    MalformedStructure,
    /// Broken nesting, undecodable scalar values or a top-level component
    /// of the wrong kind.
    Unrecoverable,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
    #[error("continuation line has nothing to continue")]
    InvalidContentLine,
    #[error("content line has no name")]
    MissingPropertyName,
    #[error("name contains a character outside [A-Za-z0-9-]")]
    InvalidPropertyName,
    #[error("content line has no ':' before its value")]
    MissingColon,
    #[error("parameter is not NAME=VALUE")]
    InvalidParameter,
    #[error("quoted parameter value is not terminated")]
    UnclosedQuote,
    #[error("expected a BEGIN line")]
    MissingBegin,
    #[error("component is never closed")]
    MissingEnd,
    #[error("component name does not match")]
    MismatchedComponent,
    #[error("not a BOOLEAN")]
    InvalidBoolean,
    #[error("not an INTEGER")]
    InvalidInteger,
    #[error("not a FLOAT")]
    InvalidFloat,
}

impl ParseErrorKind {
    #[must_use]
    pub const fn class(self) -> FailureClass {
        use FailureClass::{MalformedStructure, Unrecoverable};
        match self {
            Self::InvalidUtf8
            | Self::InvalidContentLine
            | Self::MissingPropertyName
            | Self::InvalidPropertyName
            | Self::MissingColon
            | Self::InvalidParameter
            | Self::UnclosedQuote => MalformedStructure,
            Self::MissingBegin
            | Self::MissingEnd
            | Self::MismatchedComponent
            | Self::InvalidBoolean
            | Self::InvalidInteger
            | Self::InvalidFloat => Unrecoverable,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

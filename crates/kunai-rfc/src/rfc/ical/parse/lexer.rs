//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Splits raw input into logical content lines and tokenizes each one into
//! name, parameters and raw value. Decoding happens one physical line at a
//! time, so a fold that cuts through a multi-byte character surfaces as
//! [`ParseErrorKind::InvalidUtf8`].

use std::iter::Peekable;
use std::str::CharIndices;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::Parameter;

/// One unfolded content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Upper-cased property name (or `BEGIN`/`END`).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Everything after the first unquoted colon, verbatim.
    pub raw_value: String,
    /// Physical line the content line starts on (1-based).
    pub line: usize,
}

impl ContentLine {
    /// Returns the first value of parameter `name`.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|p| p.is(name))?.value()
    }
}

/// Splits input into logical lines, merging folded continuations.
///
/// Both CRLF and bare LF terminate a line. A line starting with SP or HTAB
/// continues the previous one with that single whitespace removed. Empty
/// lines are skipped. Returns `(line_number, text)` pairs.
///
/// ## Errors
/// `InvalidUtf8` when a physical line does not decode, `InvalidContentLine`
/// when the input starts with a continuation line.
pub fn split_lines(input: &[u8]) -> ParseResult<Vec<(usize, String)>> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (index, raw) in input.split(|b| *b == b'\n').enumerate() {
        let line_num = index + 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        if raw.is_empty() {
            continue;
        }

        let line = std::str::from_utf8(raw).map_err(|e| {
            ParseError::new(ParseErrorKind::InvalidUtf8, line_num, e.valid_up_to() + 1)
        })?;

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            let Some((_, prev)) = lines.last_mut() else {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidContentLine, line_num, 1)
                        .with_context("continuation line without a preceding line"),
                );
            };
            prev.push_str(continuation);
        } else {
            lines.push((line_num, line.to_string()));
        }
    }

    Ok(lines)
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns a malformed-structure error if the name, a parameter or the
/// colon separator is missing or invalid.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut chars = line.char_indices().peekable();

    let name_end = loop {
        match chars.peek() {
            Some(&(i, ';' | ':')) => break i,
            Some(&(i, c)) if !c.is_ascii_alphanumeric() && c != '-' => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidPropertyName,
                    line_num,
                    i + 1,
                )
                .with_context(format!("unexpected character '{c}'")));
            }
            Some(_) => {
                chars.next();
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len() + 1,
                ));
            }
        }
    };

    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }

    let name = line[..name_end].to_ascii_uppercase();
    let mut params = Vec::new();

    // Each iteration consumes one delimiter: ';' opens a parameter, ':' ends
    // the header.
    let value_start = loop {
        match chars.next() {
            Some((i, ':')) => break i + 1,
            Some((_, ';')) => params.push(parse_parameter(&mut chars, line, line_num)?),
            Some((i, c)) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}'")),
                );
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len() + 1,
                ));
            }
        }
    };

    Ok(ContentLine {
        name,
        params,
        raw_value: line[value_start..].to_string(),
        line: line_num,
    })
}

/// Parses `NAME=value *("," value)`, leaving the following delimiter
/// unconsumed.
fn parse_parameter(
    chars: &mut Peekable<CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<Parameter> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);

    let name_end = loop {
        match chars.next() {
            Some((i, '=')) => break i,
            Some((_, c)) if c.is_ascii_alphanumeric() || c == '-' => {}
            Some((i, _)) => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidParameter,
                    line_num,
                    i + 1,
                ));
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len() + 1,
                ));
            }
        }
    };

    if name_end == start {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            start + 1,
        )
        .with_context("empty parameter name"));
    }

    let mut values = vec![parse_param_value(chars, line, line_num)?];
    while chars.next_if(|&(_, c)| c == ',').is_some() {
        values.push(parse_param_value(chars, line, line_num)?);
    }

    Ok(Parameter::with_values(&line[start..name_end], values))
}

/// Parses one parameter value, quoted (with RFC 6868 caret decoding) or bare.
fn parse_param_value(
    chars: &mut Peekable<CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<String> {
    let Some(&(start, first)) = chars.peek() else {
        return Err(ParseError::new(
            ParseErrorKind::MissingColon,
            line_num,
            line.len() + 1,
        ));
    };

    if first != '"' {
        let mut end = start;
        while let Some((i, c)) = chars.next_if(|&(_, c)| !matches!(c, ',' | ';' | ':')) {
            end = i + c.len_utf8();
        }
        return Ok(line[start..end].to_string());
    }

    chars.next();
    let mut value = String::new();
    loop {
        match chars.next() {
            Some((_, '"')) => return Ok(value),
            Some((_, '^')) => match chars.next_if(|&(_, c)| matches!(c, '^' | 'n' | '\'')) {
                Some((_, '^')) => value.push('^'),
                Some((_, 'n')) => value.push('\n'),
                Some(_) => value.push('"'),
                None => value.push('^'),
            },
            Some((_, c)) => value.push(c),
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::UnclosedQuote,
                    line_num,
                    start + 1,
                ));
            }
        }
    }
}

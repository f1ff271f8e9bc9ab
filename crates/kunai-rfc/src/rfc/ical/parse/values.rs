//! Value decoding (RFC 5545 §3.3).
//!
//! Only the scalar types whose wire form maps one-to-one onto a Rust value
//! are decoded. Everything else stays [`Value::Unknown`] so it renders back
//! exactly as it was read.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{Value, ValueType};

/// TEXT properties whose value is a comma-separated list.
const TEXT_LIST_PROPERTIES: &[&str] = &["CATEGORIES", "RESOURCES"];

/// Properties with a `;`-structured value that TEXT/FLOAT decoding would
/// mangle.
const STRUCTURED_PROPERTIES: &[&str] = &["GEO", "REQUEST-STATUS"];

/// Unescapes a TEXT value (RFC 5545 §3.3.11).
///
/// Unknown escape sequences are kept verbatim.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(escaped @ ('\\' | ',' | ';')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Splits a TEXT list on commas that are not backslash-escaped.
#[must_use]
pub fn split_text_list(s: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ',' => {
                items.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&s[start..]);
    items
}

/// Decodes the raw value of property `name` as `value_type`.
///
/// `explicit` is true when the type came from a `VALUE` parameter.
///
/// ## Errors
/// `InvalidInteger`, `InvalidFloat` or `InvalidBoolean` when a scalar does
/// not parse.
pub fn decode_value(
    name: &str,
    raw: &str,
    value_type: ValueType,
    explicit: bool,
    line_num: usize,
) -> ParseResult<Value> {
    if !explicit && STRUCTURED_PROPERTIES.contains(&name) {
        return Ok(Value::Unknown(raw.to_string()));
    }

    let invalid = |kind| {
        ParseError::new(kind, line_num, 1).with_context(format!("{name}: {raw:?}"))
    };

    Ok(match value_type {
        ValueType::Text if TEXT_LIST_PROPERTIES.contains(&name) => Value::List(
            split_text_list(raw)
                .into_iter()
                .map(|item| Value::Text(unescape_text(item)))
                .collect(),
        ),
        ValueType::Text => Value::Text(unescape_text(raw)),
        ValueType::Integer => Value::Integer(
            raw.trim()
                .parse()
                .map_err(|_| invalid(ParseErrorKind::InvalidInteger))?,
        ),
        ValueType::Float => Value::Float(
            raw.trim()
                .parse()
                .map_err(|_| invalid(ParseErrorKind::InvalidFloat))?,
        ),
        ValueType::Boolean => match raw.trim().to_ascii_uppercase().as_str() {
            "TRUE" => Value::Boolean(true),
            "FALSE" => Value::Boolean(false),
            _ => return Err(invalid(ParseErrorKind::InvalidBoolean)),
        },
        ValueType::Uri => Value::Uri(raw.to_string()),
        ValueType::CalAddress => Value::CalAddress(raw.to_string()),
        _ => Value::Unknown(raw.to_string()),
    })
}

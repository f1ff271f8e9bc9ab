//! Component tree construction from content lines.

use std::vec::IntoIter;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{ContentLine, parse_content_line, split_lines};
use super::values::decode_value;
use crate::rfc::ical::core::{
    Component, ComponentKind, PropertyValue, Value, ValueType, logical_name,
};

/// Parses every top-level component in `input`, requiring each to be of
/// `kind`. Empty input yields no components.
///
/// ## Errors
/// Malformed content lines, broken BEGIN/END nesting, top-level components
/// of another kind and undecodable scalar values.
pub fn parse_components(input: &[u8], kind: ComponentKind) -> ParseResult<Vec<Component>> {
    let lines = split_lines(input)?;
    tracing::trace!(count = lines.len(), "Split lines");

    let content_lines = lines
        .iter()
        .map(|(line_num, line)| parse_content_line(line, *line_num))
        .collect::<ParseResult<Vec<_>>>()?;

    let mut iter = content_lines.into_iter();
    let mut components = Vec::new();

    while let Some(line) = iter.next() {
        if line.name != "BEGIN" {
            return Err(ParseError::new(ParseErrorKind::MissingBegin, line.line, 1)
                .with_context(format!("expected BEGIN, got {}", line.name)));
        }

        let wire_name = line.raw_value.trim();
        let found = ComponentKind::from_wire_name(wire_name);
        if found != kind {
            tracing::warn!(expected = %kind, found = wire_name, "Unexpected top-level component");
            return Err(
                ParseError::new(ParseErrorKind::MismatchedComponent, line.line, 1)
                    .with_context(format!("expected {kind}, got {wire_name}")),
            );
        }

        components.push(parse_component(&mut iter, wire_name, line.line)?);
    }

    tracing::debug!(count = components.len(), "Parsed components");
    Ok(components)
}

/// Parses the body of a component whose BEGIN line was already consumed.
fn parse_component(
    iter: &mut IntoIter<ContentLine>,
    wire_name: &str,
    begin_line: usize,
) -> ParseResult<Component> {
    let mut component = Component::from_wire_name(wire_name);
    let mut last_line = begin_line;

    loop {
        let Some(line) = iter.next() else {
            return Err(ParseError::new(ParseErrorKind::MissingEnd, last_line, 1)
                .with_context(format!("missing END:{wire_name}")));
        };
        last_line = line.line;

        match line.name.as_str() {
            "BEGIN" => {
                let child = parse_component(iter, line.raw_value.trim(), line.line)?;
                component.add_component(child);
            }
            "END" => {
                let end_name = line.raw_value.trim();
                if !end_name.eq_ignore_ascii_case(wire_name) {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line.line, 1)
                            .with_context(format!("expected END:{wire_name}, got END:{end_name}")),
                    );
                }
                return Ok(component);
            }
            _ => add_property(&mut component, line)?,
        }
    }
}

/// Decodes a content line and stores it in its static slot, or as a custom
/// property keyed by the logical form of its name.
fn add_property(component: &mut Component, line: ContentLine) -> ParseResult<()> {
    let schema = component.schema();
    let descriptor = schema.descriptor(&line.name);
    let key = descriptor.map_or_else(|| logical_name(&line.name), |d| d.name.clone());

    let value = match line.param_value("VALUE") {
        Some(param) => match ValueType::from_param(param) {
            Some(explicit) => decode_value(&line.name, &line.raw_value, explicit, true, line.line)?,
            None => Value::Unknown(line.raw_value.clone()),
        },
        None => {
            let default_type = descriptor
                .map(|d| d.default_type)
                .or_else(|| schema.default_type(&key))
                .unwrap_or(ValueType::Text);
            decode_value(&line.name, &line.raw_value, default_type, false, line.line)?
        }
    };

    let value = PropertyValue {
        params: line.params,
        value,
    };
    if descriptor.is_some() {
        component.append(&key, value);
    } else {
        component.push_custom(key, value);
    }
    Ok(())
}

//! Component rendering (RFC 5545 §3.1, §3.4).
//!
//! Rendering walks the schema rather than the data: static properties come
//! out in descriptor order, custom properties follow in insertion order, then
//! static child slots and finally custom children. Absent single values and
//! empty lists produce no output. Nothing is validated.

use kunai_core::config::RenderConfig;
use kunai_core::error::CoreError;

use super::fold::{DEFAULT_FOLD_INDENT, fold_line_with_indent};
use crate::error::RfcResult;
use crate::rfc::ical::core::{Component, PropertyValue, ValueType, wire_name_for};

/// Whitespace written at the start of each continuation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoldIndent {
    #[default]
    Space,
    Tab,
}

impl FoldIndent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Space => DEFAULT_FOLD_INDENT,
            Self::Tab => "\t",
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub fold_indent: FoldIndent,
}

impl RenderOptions {
    /// ## Summary
    /// Builds options from the `render` configuration section.
    ///
    /// ## Errors
    /// Returns a validation error when `fold_indent` is neither a single
    /// space nor a single horizontal tab.
    pub fn from_settings(config: &RenderConfig) -> RfcResult<Self> {
        let fold_indent = match config.fold_indent.as_str() {
            " " => FoldIndent::Space,
            "\t" => FoldIndent::Tab,
            other => {
                return Err(CoreError::ValidationError(format!(
                    "render.fold_indent must be a single space or tab, got {other:?}"
                ))
                .into());
            }
        };
        Ok(Self { fold_indent })
    }
}

impl Component {
    /// Renders this component and its descendants as iCalendar text.
    #[must_use]
    pub fn to_wire_text(&self) -> String {
        self.to_wire_text_with(&RenderOptions::default())
    }

    /// Renders with explicit options.
    #[must_use]
    pub fn to_wire_text_with(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        append_component(&mut out, self, options);
        out
    }
}

fn append_component(out: &mut String, component: &Component, options: &RenderOptions) {
    tracing::trace!(component = component.wire_name(), "Rendering component");

    push_line(out, &format!("BEGIN:{}", component.wire_name()));
    append_properties(out, component, options);
    append_components(out, component, options);
    push_line(out, &format!("END:{}", component.wire_name()));
}

/// Appends every present property of `component` to `out`: static slots in
/// schema order, then custom properties in insertion order.
pub fn append_properties(out: &mut String, component: &Component, options: &RenderOptions) {
    for (descriptor, slot) in component.properties() {
        for value in slot.values() {
            append_property(
                out,
                descriptor.wire_name,
                value,
                Some(descriptor.default_type),
                options,
            );
        }
    }

    let custom = component.custom_properties();
    if custom.is_empty() {
        return;
    }

    let schema = component.schema();
    for (key, values) in custom.iter() {
        if values.is_empty() {
            continue;
        }
        let wire_name = wire_name_for(key);
        let default_type = schema.default_type(key);
        for value in values {
            append_property(out, &wire_name, value, default_type, options);
        }
    }
}

/// Appends the static child slots in schema order, then custom children.
pub fn append_components(out: &mut String, component: &Component, options: &RenderOptions) {
    for child in component.component_slots().flatten() {
        append_component(out, child, options);
    }
    for child in component.custom_components().values() {
        append_component(out, child, options);
    }
}

fn append_property(
    out: &mut String,
    wire_name: &str,
    value: &PropertyValue,
    default_type: Option<ValueType>,
    options: &RenderOptions,
) {
    let line = format!("{wire_name}{}", value.to_wire_text(default_type));
    out.push_str(&fold_line_with_indent(&line, options.fold_indent.as_str()));
    out.push_str("\r\n");
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{ComponentKind, Value};

    #[test]
    fn empty_component() {
        let event = Component::new(ComponentKind::Event);
        assert_eq!(event.to_wire_text(), "BEGIN:VEVENT\r\nEND:VEVENT\r\n");
    }

    #[test]
    fn static_properties_follow_schema_order() {
        let mut event = Component::new(ComponentKind::Event);
        event.set("summary", "Later in schema");
        event.set("uid", "abc");
        let out = event.to_wire_text();
        let uid = out.find("UID:abc").unwrap();
        let summary = out.find("SUMMARY:Later in schema").unwrap();
        assert!(uid < summary);
    }

    #[test]
    fn custom_properties_use_derived_wire_names() {
        let mut event = Component::new(ComponentKind::Event);
        event.append("ip_x_custom_field", "value");
        event.append("x_second", "2");
        let out = event.to_wire_text();
        assert!(out.contains("\r\nX-CUSTOM-FIELD:value\r\nX-SECOND:2\r\n"));
    }

    #[test]
    fn custom_property_default_type_from_schema() {
        let mut calendar = Component::new(ComponentKind::Calendar);
        calendar.set("x_published_ttl", chrono::TimeDelta::hours(1));
        calendar.set("x_wr_calname", Value::Integer(7));
        let out = calendar.to_wire_text();
        assert!(out.contains("X-PUBLISHED-TTL:PT1H\r\n"));
        assert!(out.contains("X-WR-CALNAME;VALUE=INTEGER:7\r\n"));
    }

    #[test]
    fn long_values_fold_with_configured_indent() {
        let mut event = Component::new(ComponentKind::Event);
        event.set("description", "d".repeat(100));
        let options = RenderOptions {
            fold_indent: FoldIndent::Tab,
        };
        let out = event.to_wire_text_with(&options);
        assert!(out.contains("\r\n\td"));
        for line in out.split("\r\n") {
            assert!(line.len() <= 75);
        }
    }

    #[test]
    fn options_from_settings() {
        let mut config = RenderConfig {
            fold_indent: "\t".to_string(),
        };
        assert_eq!(
            RenderOptions::from_settings(&config).unwrap().fold_indent,
            FoldIndent::Tab
        );
        config.fold_indent = "  ".to_string();
        let err = RenderOptions::from_settings(&config).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RfcError::Core(CoreError::ValidationError(_))
        ));
    }
}

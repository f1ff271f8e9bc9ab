//! iCalendar RFC 5545 implementation.
//!
//! - `core`: the component model and its per-kind schemas
//! - `parse`: content-line grammar and the recovering parse entry point
//! - `build`: value encoding, line folding and component rendering
//!
//! ## Example
//!
//! ```rust
//! use kunai_rfc::rfc::ical::{ComponentKind, core::Component, parse_as};
//!
//! let mut calendar = Component::calendar();
//! let mut event = Component::event();
//! event.set("summary", "Team Meeting");
//! event.append("categories", "Work");
//! calendar.add_component(event);
//!
//! let wire = calendar.to_wire_text();
//! assert!(wire.contains("SUMMARY:Team Meeting\r\n"));
//!
//! let parsed = parse_as(ComponentKind::Calendar, wire.as_bytes()).unwrap();
//! assert_eq!(parsed.len(), 1);
//! ```

pub mod build;
pub mod core;
pub mod parse;


pub use build::{RenderOptions, fold_line, fold_line_with_indent};
pub use core::{Component, ComponentKind, ComponentTree, PropertyValue, Value, ValueType};
pub use parse::{
    ParseError, ParseOptions, ParseResult, normalize_bad_wrapping, parse, parse_as, parse_as_with,
};

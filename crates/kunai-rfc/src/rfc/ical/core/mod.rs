//! iCalendar core models (RFC 5545).
//!
//! This module defines the data structures the renderer walks:
//! - `Component`: a node with schema-backed property slots, custom
//!   properties and nested (static or custom) sub-components
//! - `ComponentSchema`: per-kind property metadata, built once and shared
//! - `PropertyValue` / `Value`: typed values plus their parameters
//! - `ComponentTree`: a borrowed index answering parent/child navigation

mod component;
mod datetime;
mod entries;
mod parameter;
mod property;
mod schema;
mod tree;
mod value;

pub use component::{Component, ComponentKind, PropertySlot};
pub use datetime::{DateTime, DateTimeForm, Period, Time};
pub use entries::NamedEntries;
pub use parameter::Parameter;
pub use property::PropertyValue;
pub use schema::{
    ComponentSchema, ComponentSchemaBuilder, PropertyDescriptor, RESERVED_NAME_PREFIX,
    logical_name, wire_name_for,
};
pub use tree::{ComponentTree, NodeId};
pub use value::{Value, ValueType};

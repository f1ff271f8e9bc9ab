//! Per-component property metadata.
//!
//! Each [`ComponentKind`] owns one [`ComponentSchema`]: the ordered list of
//! statically known properties (wire name, slot, multiplicity, default value
//! type), the child kinds it can hold, and a default-type table consulted for
//! custom properties. Schemas are declared here with a builder, built on first
//! use and shared read-only for the rest of the process.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::{ComponentKind, ValueType};

/// Prefix carried by logical names whose bare form is reserved (`class`,
/// `method`). It is stripped when deriving a wire name.
pub const RESERVED_NAME_PREFIX: &str = "ip_";

const RESERVED_NAMES: &[&str] = &["class", "method"];

/// Derives the wire name for a logical or custom property key.
///
/// `ip_x_custom_field` → `X-CUSTOM-FIELD`, `dtstart` → `DTSTART`.
#[must_use]
pub fn wire_name_for(key: &str) -> String {
    key.strip_prefix(RESERVED_NAME_PREFIX)
        .unwrap_or(key)
        .replace('_', "-")
        .to_ascii_uppercase()
}

/// Derives the logical name for a wire name.
///
/// `LAST-MODIFIED` → `last_modified`, `CLASS` → `ip_class`.
#[must_use]
pub fn logical_name(wire_name: &str) -> String {
    let name = wire_name.replace('-', "_").to_ascii_lowercase();
    if RESERVED_NAMES.contains(&name.as_str()) {
        format!("{RESERVED_NAME_PREFIX}{name}")
    } else {
        name
    }
}

/// Metadata for one statically known property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Logical name (`last_modified`).
    pub name: String,
    /// Wire name (`LAST-MODIFIED`).
    pub wire_name: &'static str,
    /// Index of the property slot on a component instance.
    pub slot: usize,
    /// Multi-valued properties render one line per value.
    pub multi: bool,
    /// Value type assumed when a value does not state its own.
    pub default_type: ValueType,
}

/// Property and sub-component metadata for one component kind.
#[derive(Debug, Clone)]
pub struct ComponentSchema {
    kind: ComponentKind,
    properties: Vec<PropertyDescriptor>,
    components: Vec<ComponentKind>,
    default_types: HashMap<String, ValueType>,
}

impl ComponentSchema {
    /// Starts declaring the schema of `kind`.
    #[must_use]
    pub fn builder(kind: ComponentKind) -> ComponentSchemaBuilder {
        ComponentSchemaBuilder {
            schema: Self {
                kind,
                properties: Vec::new(),
                components: Vec::new(),
                default_types: HashMap::new(),
            },
        }
    }

    /// The schema registered for `kind`, built on first access.
    #[must_use]
    pub fn of(kind: ComponentKind) -> &'static Self {
        static SCHEMAS: [OnceLock<ComponentSchema>; ComponentKind::COUNT] =
            [const { OnceLock::new() }; ComponentKind::COUNT];

        SCHEMAS[kind.index()].get_or_init(|| {
            tracing::trace!(%kind, "Building component schema");
            declare(kind)
        })
    }

    /// The kind this schema describes.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Property descriptors in render order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Child kinds with a dedicated slot, in render order.
    #[must_use]
    pub fn components(&self) -> &[ComponentKind] {
        &self.components
    }

    /// Finds the descriptor for a key given as logical name, custom-style key
    /// or wire name.
    #[must_use]
    pub fn descriptor(&self, key: &str) -> Option<&PropertyDescriptor> {
        let wire = wire_name_for(key);
        self.properties.iter().find(|d| d.wire_name == wire)
    }

    /// Default value type registered for a property key, if any.
    #[must_use]
    pub fn default_type(&self, key: &str) -> Option<ValueType> {
        self.default_types
            .get(&logical_name(&wire_name_for(key)))
            .copied()
    }

    /// Slot index holding children of `kind`.
    #[must_use]
    pub fn component_slot(&self, kind: ComponentKind) -> Option<usize> {
        if kind == ComponentKind::Custom {
            return None;
        }
        self.components.iter().position(|k| *k == kind)
    }
}

/// Builder for [`ComponentSchema`].
#[derive(Debug)]
pub struct ComponentSchemaBuilder {
    schema: ComponentSchema,
}

impl ComponentSchemaBuilder {
    /// Declares a single-valued property.
    #[must_use]
    pub fn single(self, wire_name: &'static str, default_type: ValueType) -> Self {
        self.property(wire_name, false, default_type)
    }

    /// Declares a multi-valued property.
    #[must_use]
    pub fn multi(self, wire_name: &'static str, default_type: ValueType) -> Self {
        self.property(wire_name, true, default_type)
    }

    /// Registers a default type for a property that has no slot (extension
    /// properties stored as custom properties).
    #[must_use]
    pub fn extension(mut self, wire_name: &'static str, default_type: ValueType) -> Self {
        self.schema
            .default_types
            .insert(logical_name(wire_name), default_type);
        self
    }

    /// Declares a child kind with its own slot.
    #[must_use]
    pub fn component(mut self, kind: ComponentKind) -> Self {
        self.schema.components.push(kind);
        self
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> ComponentSchema {
        self.schema
    }

    fn property(mut self, wire_name: &'static str, multi: bool, default_type: ValueType) -> Self {
        let name = logical_name(wire_name);
        self.schema.default_types.insert(name.clone(), default_type);
        let slot = self.schema.properties.len();
        self.schema.properties.push(PropertyDescriptor {
            name,
            wire_name,
            slot,
            multi,
            default_type,
        });
        self
    }
}

fn declare(kind: ComponentKind) -> ComponentSchema {
    use ValueType::{
        CalAddress, DateTime, Duration, Float, Integer, Period, Recur, Text, Uri, UtcOffset,
    };

    let builder = ComponentSchema::builder(kind);
    match kind {
        ComponentKind::Calendar => builder
            .single("PRODID", Text)
            .single("VERSION", Text)
            .single("CALSCALE", Text)
            .single("METHOD", Text)
            .single("UID", Text)
            .single("LAST-MODIFIED", DateTime)
            .single("URL", Uri)
            .single("REFRESH-INTERVAL", Duration)
            .single("SOURCE", Uri)
            .single("COLOR", Text)
            .multi("NAME", Text)
            .multi("DESCRIPTION", Text)
            .multi("CATEGORIES", Text)
            .multi("IMAGE", Uri)
            .extension("X-WR-CALNAME", Text)
            .extension("X-WR-CALDESC", Text)
            .extension("X-WR-TIMEZONE", Text)
            .extension("X-WR-RELCALID", Text)
            .extension("X-PUBLISHED-TTL", Duration)
            .component(ComponentKind::Timezone)
            .component(ComponentKind::Event)
            .component(ComponentKind::Todo)
            .component(ComponentKind::Journal)
            .component(ComponentKind::FreeBusy)
            .build(),
        ComponentKind::Event => builder
            .single("DTSTAMP", DateTime)
            .single("UID", Text)
            .single("DTSTART", DateTime)
            .single("CLASS", Text)
            .single("CREATED", DateTime)
            .single("DESCRIPTION", Text)
            .single("GEO", Float)
            .single("LAST-MODIFIED", DateTime)
            .single("LOCATION", Text)
            .single("ORGANIZER", CalAddress)
            .single("PRIORITY", Integer)
            .single("SEQUENCE", Integer)
            .single("STATUS", Text)
            .single("SUMMARY", Text)
            .single("TRANSP", Text)
            .single("URL", Uri)
            .single("RECURRENCE-ID", DateTime)
            .single("DTEND", DateTime)
            .single("DURATION", Duration)
            .single("COLOR", Text)
            .multi("RRULE", Recur)
            .multi("ATTACH", Uri)
            .multi("ATTENDEE", CalAddress)
            .multi("CATEGORIES", Text)
            .multi("COMMENT", Text)
            .multi("CONTACT", Text)
            .multi("EXDATE", DateTime)
            .multi("REQUEST-STATUS", Text)
            .multi("RELATED-TO", Text)
            .multi("RESOURCES", Text)
            .multi("RDATE", DateTime)
            .multi("CONFERENCE", Uri)
            .multi("IMAGE", Uri)
            .extension("X-MICROSOFT-CDO-ALLDAYEVENT", Text)
            .extension("X-ALT-DESC", Text)
            .component(ComponentKind::Alarm)
            .build(),
        ComponentKind::Todo => builder
            .single("DTSTAMP", DateTime)
            .single("UID", Text)
            .single("CLASS", Text)
            .single("COMPLETED", DateTime)
            .single("CREATED", DateTime)
            .single("DESCRIPTION", Text)
            .single("DTSTART", DateTime)
            .single("GEO", Float)
            .single("LAST-MODIFIED", DateTime)
            .single("LOCATION", Text)
            .single("ORGANIZER", CalAddress)
            .single("PERCENT-COMPLETE", Integer)
            .single("PRIORITY", Integer)
            .single("RECURRENCE-ID", DateTime)
            .single("SEQUENCE", Integer)
            .single("STATUS", Text)
            .single("SUMMARY", Text)
            .single("URL", Uri)
            .single("DUE", DateTime)
            .single("DURATION", Duration)
            .single("COLOR", Text)
            .multi("RRULE", Recur)
            .multi("ATTACH", Uri)
            .multi("ATTENDEE", CalAddress)
            .multi("CATEGORIES", Text)
            .multi("COMMENT", Text)
            .multi("CONTACT", Text)
            .multi("EXDATE", DateTime)
            .multi("REQUEST-STATUS", Text)
            .multi("RELATED-TO", Text)
            .multi("RESOURCES", Text)
            .multi("RDATE", DateTime)
            .multi("CONFERENCE", Uri)
            .multi("IMAGE", Uri)
            .component(ComponentKind::Alarm)
            .build(),
        ComponentKind::Journal => builder
            .single("DTSTAMP", DateTime)
            .single("UID", Text)
            .single("CLASS", Text)
            .single("CREATED", DateTime)
            .single("DTSTART", DateTime)
            .single("LAST-MODIFIED", DateTime)
            .single("ORGANIZER", CalAddress)
            .single("RECURRENCE-ID", DateTime)
            .single("SEQUENCE", Integer)
            .single("STATUS", Text)
            .single("SUMMARY", Text)
            .single("URL", Uri)
            .single("COLOR", Text)
            .multi("RRULE", Recur)
            .multi("ATTACH", Uri)
            .multi("ATTENDEE", CalAddress)
            .multi("CATEGORIES", Text)
            .multi("COMMENT", Text)
            .multi("CONTACT", Text)
            .multi("DESCRIPTION", Text)
            .multi("EXDATE", DateTime)
            .multi("RELATED-TO", Text)
            .multi("RDATE", DateTime)
            .multi("REQUEST-STATUS", Text)
            .multi("IMAGE", Uri)
            .build(),
        ComponentKind::FreeBusy => builder
            .single("DTSTAMP", DateTime)
            .single("UID", Text)
            .single("CONTACT", Text)
            .single("DTSTART", DateTime)
            .single("DTEND", DateTime)
            .single("ORGANIZER", CalAddress)
            .single("URL", Uri)
            .multi("ATTENDEE", CalAddress)
            .multi("COMMENT", Text)
            .multi("FREEBUSY", Period)
            .multi("REQUEST-STATUS", Text)
            .build(),
        ComponentKind::Timezone => builder
            .single("TZID", Text)
            .single("LAST-MODIFIED", DateTime)
            .single("TZURL", Uri)
            .extension("X-LIC-LOCATION", Text)
            .component(ComponentKind::Standard)
            .component(ComponentKind::Daylight)
            .build(),
        ComponentKind::Standard | ComponentKind::Daylight => builder
            .single("DTSTART", DateTime)
            .single("TZOFFSETFROM", UtcOffset)
            .single("TZOFFSETTO", UtcOffset)
            .multi("COMMENT", Text)
            .multi("RDATE", DateTime)
            .multi("RRULE", Recur)
            .multi("TZNAME", Text)
            .build(),
        ComponentKind::Alarm => builder
            .single("ACTION", Text)
            .single("TRIGGER", Duration)
            .single("DURATION", Duration)
            .single("REPEAT", Integer)
            .single("DESCRIPTION", Text)
            .single("SUMMARY", Text)
            .single("UID", Text)
            .single("ACKNOWLEDGED", DateTime)
            .single("PROXIMITY", Text)
            .multi("ATTENDEE", CalAddress)
            .multi("ATTACH", Uri)
            .multi("RELATED-TO", Text)
            .build(),
        ComponentKind::Custom => builder.build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_and_logical_names() {
        assert_eq!(wire_name_for("ip_x_custom_field"), "X-CUSTOM-FIELD");
        assert_eq!(wire_name_for("last_modified"), "LAST-MODIFIED");
        assert_eq!(wire_name_for("ip_class"), "CLASS");
        assert_eq!(logical_name("LAST-MODIFIED"), "last_modified");
        assert_eq!(logical_name("CLASS"), "ip_class");
        assert_eq!(logical_name("METHOD"), "ip_method");
    }

    #[test]
    fn slots_follow_declaration_order() {
        let schema = ComponentSchema::of(ComponentKind::Event);
        for (i, d) in schema.properties().iter().enumerate() {
            assert_eq!(d.slot, i);
        }
        let summary = schema.descriptor("summary").unwrap();
        assert_eq!(summary.wire_name, "SUMMARY");
        assert!(!summary.multi);
        assert!(schema.descriptor("categories").unwrap().multi);
    }

    #[test]
    fn descriptor_accepts_any_spelling() {
        let schema = ComponentSchema::of(ComponentKind::Event);
        let by_logical = schema.descriptor("ip_class").unwrap();
        assert_eq!(schema.descriptor("class"), Some(by_logical));
        assert_eq!(schema.descriptor("CLASS"), Some(by_logical));
        assert_eq!(by_logical.name, "ip_class");
        assert!(schema.descriptor("x_custom").is_none());
    }

    #[test]
    fn default_types_cover_static_and_extension_properties() {
        let calendar = ComponentSchema::of(ComponentKind::Calendar);
        assert_eq!(calendar.default_type("prodid"), Some(ValueType::Text));
        assert_eq!(calendar.default_type("x_wr_calname"), Some(ValueType::Text));
        assert_eq!(
            calendar.default_type("ip_x_published_ttl"),
            Some(ValueType::Duration)
        );
        assert_eq!(calendar.default_type("x_unknown"), None);
    }

    #[test]
    fn schema_is_shared() {
        let a = ComponentSchema::of(ComponentKind::Todo);
        let b = ComponentSchema::of(ComponentKind::Todo);
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn component_slots() {
        let calendar = ComponentSchema::of(ComponentKind::Calendar);
        assert_eq!(calendar.component_slot(ComponentKind::Timezone), Some(0));
        assert_eq!(calendar.component_slot(ComponentKind::Event), Some(1));
        assert_eq!(calendar.component_slot(ComponentKind::Alarm), None);
        assert_eq!(calendar.component_slot(ComponentKind::Custom), None);

        let timezone = ComponentSchema::of(ComponentKind::Timezone);
        assert_eq!(
            timezone.components(),
            &[ComponentKind::Standard, ComponentKind::Daylight]
        );
    }
}

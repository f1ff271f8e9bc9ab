//! iCalendar component types (RFC 5545 §3.4-3.6).

use std::fmt;

use chrono::Utc;
use kunai_core::constants::{DEFAULT_PRODID, ICALENDAR_VERSION};

use super::schema::logical_name;
use super::{
    ComponentSchema, ComponentTree, NamedEntries, PropertyDescriptor, PropertyValue, Value,
};

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTODO component.
    Todo,
    /// VJOURNAL component.
    Journal,
    /// VFREEBUSY component.
    FreeBusy,
    /// VTIMEZONE component.
    Timezone,
    /// STANDARD observance of VTIMEZONE.
    Standard,
    /// DAYLIGHT observance of VTIMEZONE.
    Daylight,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
    /// Any component this crate has no schema for (X-names, IANA tokens).
    Custom,
}

impl ComponentKind {
    /// Number of kinds, one schema each.
    pub const COUNT: usize = 10;

    const ALL: [Self; Self::COUNT] = [
        Self::Calendar,
        Self::Event,
        Self::Todo,
        Self::Journal,
        Self::FreeBusy,
        Self::Timezone,
        Self::Standard,
        Self::Daylight,
        Self::Alarm,
        Self::Custom,
    ];

    /// Returns the wire name of this kind. Custom components carry their own.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Todo => "VTODO",
            Self::Journal => "VJOURNAL",
            Self::FreeBusy => "VFREEBUSY",
            Self::Timezone => "VTIMEZONE",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
            Self::Alarm => "VALARM",
            Self::Custom => "X-CUSTOM",
        }
    }

    /// Returns the logical name (`event`, `freebusy`, `standard`).
    #[must_use]
    pub const fn logical_name(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Event => "event",
            Self::Todo => "todo",
            Self::Journal => "journal",
            Self::FreeBusy => "freebusy",
            Self::Timezone => "timezone",
            Self::Standard => "standard",
            Self::Daylight => "daylight",
            Self::Alarm => "alarm",
            Self::Custom => "custom",
        }
    }

    /// Resolves a wire name (case-insensitive). Unknown names map to
    /// [`ComponentKind::Custom`].
    #[must_use]
    pub fn from_wire_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| *kind != Self::Custom && kind.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(Self::Custom)
    }

    /// The property and sub-component schema of this kind.
    #[must_use]
    pub fn schema(self) -> &'static ComponentSchema {
        ComponentSchema::of(self)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage for one statically known property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySlot {
    /// Single-valued property, `None` when absent.
    Single(Option<PropertyValue>),
    /// Multi-valued property, empty when absent.
    Multi(Vec<PropertyValue>),
}

impl PropertySlot {
    fn empty(descriptor: &PropertyDescriptor) -> Self {
        if descriptor.multi {
            Self::Multi(Vec::new())
        } else {
            Self::Single(None)
        }
    }

    /// Present values in order (zero or one for single-valued slots).
    #[must_use]
    pub fn values(&self) -> &[PropertyValue] {
        match self {
            Self::Single(value) => value.as_slice(),
            Self::Multi(values) => values,
        }
    }

    /// Returns whether the slot holds no value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

/// An iCalendar component.
///
/// Statically known properties live in slots laid out by the kind's
/// [`ComponentSchema`]; everything else is kept in ordered custom maps so
/// that nothing read from the wire is lost. Children are owned; use
/// [`Component::tree`] to navigate upwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    kind: ComponentKind,
    name: String,
    wire_name: String,
    properties: Vec<PropertySlot>,
    custom_properties: NamedEntries<PropertyValue>,
    components: Vec<Vec<Component>>,
    custom_components: NamedEntries<Component>,
}

impl Component {
    /// Creates an empty component of a known kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self::with_names(kind, kind.logical_name().to_string(), kind.as_str().to_string())
    }

    /// Creates an empty component from its wire name.
    ///
    /// Names without a schema become custom components that keep `wire_name`
    /// verbatim for rendering.
    #[must_use]
    pub fn from_wire_name(wire_name: &str) -> Self {
        match ComponentKind::from_wire_name(wire_name) {
            ComponentKind::Custom => Self::with_names(
                ComponentKind::Custom,
                logical_name(wire_name),
                wire_name.to_string(),
            ),
            kind => Self::new(kind),
        }
    }

    fn with_names(kind: ComponentKind, name: String, wire_name: String) -> Self {
        let schema = kind.schema();
        Self {
            kind,
            name,
            wire_name,
            properties: schema.properties().iter().map(PropertySlot::empty).collect(),
            custom_properties: NamedEntries::new(),
            components: vec![Vec::new(); schema.components().len()],
            custom_components: NamedEntries::new(),
        }
    }

    /// Creates a VCALENDAR with VERSION, PRODID and CALSCALE set.
    #[must_use]
    pub fn calendar() -> Self {
        let mut calendar = Self::new(ComponentKind::Calendar);
        calendar.set("version", ICALENDAR_VERSION);
        calendar.set("prodid", DEFAULT_PRODID);
        calendar.set("calscale", "GREGORIAN");
        calendar
    }

    /// Creates a VEVENT with a fresh UID and the current DTSTAMP.
    #[must_use]
    pub fn event() -> Self {
        Self::stamped(ComponentKind::Event)
    }

    /// Creates a VTODO with a fresh UID and the current DTSTAMP.
    #[must_use]
    pub fn todo() -> Self {
        Self::stamped(ComponentKind::Todo)
    }

    /// Creates a VJOURNAL with a fresh UID and the current DTSTAMP.
    #[must_use]
    pub fn journal() -> Self {
        Self::stamped(ComponentKind::Journal)
    }

    /// Creates a VFREEBUSY with a fresh UID and the current DTSTAMP.
    #[must_use]
    pub fn freebusy() -> Self {
        Self::stamped(ComponentKind::FreeBusy)
    }

    /// Creates a VTIMEZONE for `tzid`.
    #[must_use]
    pub fn timezone(tzid: impl Into<String>) -> Self {
        let mut timezone = Self::new(ComponentKind::Timezone);
        timezone.set("tzid", tzid.into());
        timezone
    }

    /// Creates a VALARM with a fresh UID.
    #[must_use]
    pub fn alarm() -> Self {
        let mut alarm = Self::new(ComponentKind::Alarm);
        alarm.set("uid", Self::new_uid());
        alarm
    }

    fn stamped(kind: ComponentKind) -> Self {
        let mut component = Self::new(kind);
        component.set("uid", Self::new_uid());
        component.set("dtstamp", Utc::now());
        component
    }

    /// Generates a random UID.
    #[must_use]
    pub fn new_uid() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// The kind of this component.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Logical name (`event`, or the lower-cased name of a custom component).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name used on the `BEGIN:`/`END:` lines.
    #[must_use]
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    /// The schema this component is laid out by.
    #[must_use]
    pub fn schema(&self) -> &'static ComponentSchema {
        self.kind.schema()
    }

    /// Sets a property, replacing every existing value.
    ///
    /// Keys resolve to a static slot when the schema knows them; any other
    /// key is stored verbatim as a custom property.
    pub fn set(&mut self, key: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        match self.schema().descriptor(key) {
            Some(d) => {
                self.properties[d.slot] = if d.multi {
                    PropertySlot::Multi(vec![value])
                } else {
                    PropertySlot::Single(Some(value))
                };
            }
            None => self.custom_properties.insert(key, vec![value]),
        }
    }

    /// Adds a value to a property.
    ///
    /// Multi-valued and custom properties accumulate; a single-valued
    /// property is overwritten.
    pub fn append(&mut self, key: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        match self.schema().descriptor(key) {
            Some(d) => match &mut self.properties[d.slot] {
                PropertySlot::Multi(values) => values.push(value),
                PropertySlot::Single(slot) => *slot = Some(value),
            },
            None => self.custom_properties.push(key, value),
        }
    }

    /// Appends to the custom property stored under exactly `key`, bypassing
    /// schema resolution. Parsed names with no descriptor land here so that
    /// `IP-SUMMARY` never reaches the SUMMARY slot.
    pub(crate) fn push_custom(&mut self, key: String, value: PropertyValue) {
        self.custom_properties.push(key, value);
    }

    /// Removes a property, returning its former values.
    pub fn remove(&mut self, key: &str) -> Vec<PropertyValue> {
        match self.schema().descriptor(key) {
            Some(d) => {
                let empty = PropertySlot::empty(d);
                match std::mem::replace(&mut self.properties[d.slot], empty) {
                    PropertySlot::Single(value) => value.into_iter().collect(),
                    PropertySlot::Multi(values) => values,
                }
            }
            None => self.custom_properties.remove(key).unwrap_or_default(),
        }
    }

    /// Returns the first value of a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.get_all(key).first()
    }

    /// Returns every value of a property (empty when absent).
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[PropertyValue] {
        match self.schema().descriptor(key) {
            Some(d) => self.properties[d.slot].values(),
            None => self.custom_properties.get(key),
        }
    }

    /// Returns the values of a custom property stored under exactly `key`.
    #[must_use]
    pub fn custom_property(&self, key: &str) -> &[PropertyValue] {
        self.custom_properties.get(key)
    }

    /// Static property slots paired with their descriptors, in schema order.
    pub fn properties(&self) -> impl Iterator<Item = (&'static PropertyDescriptor, &PropertySlot)> {
        self.schema().properties().iter().zip(&self.properties)
    }

    /// Custom properties in insertion order.
    #[must_use]
    pub fn custom_properties(&self) -> &NamedEntries<PropertyValue> {
        &self.custom_properties
    }

    /// Adds a child component.
    ///
    /// Children of a kind the schema declares go to that slot; all others
    /// are kept as custom components under the child's logical name.
    pub fn add_component(&mut self, child: Component) {
        match self.schema().component_slot(child.kind) {
            Some(slot) => self.components[slot].push(child),
            None => {
                let name = child.name.clone();
                self.custom_components.push(name, child);
            }
        }
    }

    /// Children of `kind` held in the static slot for that kind.
    #[must_use]
    pub fn components_of(&self, kind: ComponentKind) -> &[Component] {
        self.schema()
            .component_slot(kind)
            .map(|slot| self.components[slot].as_slice())
            .unwrap_or_default()
    }

    /// Custom children stored under `name`.
    #[must_use]
    pub fn custom_components_named(&self, name: &str) -> &[Component] {
        self.custom_components.get(name)
    }

    /// Static child slots in schema order.
    pub fn component_slots(&self) -> impl Iterator<Item = &[Component]> {
        self.components.iter().map(Vec::as_slice)
    }

    /// Custom children in insertion order.
    #[must_use]
    pub fn custom_components(&self) -> &NamedEntries<Component> {
        &self.custom_components
    }

    /// Every child in render order: static slots first, custom ones last.
    pub fn children(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .flatten()
            .chain(self.custom_components.values())
    }

    /// Builds a navigable index over this component and its descendants.
    #[must_use]
    pub fn tree(&self) -> ComponentTree<'_> {
        ComponentTree::new(self)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_text()
    }

    /// Returns the UID value if present.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.text("uid")
    }

    /// Returns the SUMMARY value if present.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.text("summary")
    }

    /// Returns the (first) DESCRIPTION value if present.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    /// Returns the CATEGORIES of every CATEGORIES line, flattened.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.get_all("categories")
            .iter()
            .flat_map(|pv| match &pv.value {
                Value::List(items) => items.iter().filter_map(Value::as_text).collect(),
                other => other.as_text().into_iter().collect::<Vec<_>>(),
            })
            .collect()
    }
}

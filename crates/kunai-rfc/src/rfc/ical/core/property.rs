//! Property values with their parameters.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use super::{DateTime, Parameter, Period, Value};

/// One value of a property together with its parameters.
///
/// The property name is not stored here: static properties take it from
/// their schema descriptor, custom properties from their map key.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// The typed value.
    pub value: Value,
}

impl PropertyValue {
    /// Creates a property value without parameters.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            params: Vec::new(),
            value: value.into(),
        }
    }

    /// Creates an undecoded value from raw wire text.
    #[must_use]
    pub fn raw(raw: impl Into<String>) -> Self {
        Self::new(Value::Unknown(raw.into()))
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.is(name))
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Sets a parameter, replacing any existing parameter with the same name.
    pub fn set_param(&mut self, param: Parameter) {
        self.params.retain(|p| !p.is(&param.name));
        self.params.push(param);
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

macro_rules! property_value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    Self::new(Value::from(value))
                }
            }
        )*
    };
}

property_value_from!(
    &str,
    String,
    i32,
    f64,
    bool,
    NaiveDate,
    NaiveDateTime,
    chrono::DateTime<Utc>,
    DateTime,
    TimeDelta,
    Period,
    FixedOffset,
);

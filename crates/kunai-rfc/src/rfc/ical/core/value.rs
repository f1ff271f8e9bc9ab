//! iCalendar value types (RFC 5545 §3.3).

use std::fmt;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use super::{DateTime, Period, Time};

/// Value type names usable in a `VALUE` parameter (RFC 5545 §3.2.20).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
}

impl ValueType {
    /// Returns the wire name of this value type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::Boolean => "BOOLEAN",
            Self::CalAddress => "CAL-ADDRESS",
            Self::Date => "DATE",
            Self::DateTime => "DATE-TIME",
            Self::Duration => "DURATION",
            Self::Float => "FLOAT",
            Self::Integer => "INTEGER",
            Self::Period => "PERIOD",
            Self::Recur => "RECUR",
            Self::Text => "TEXT",
            Self::Time => "TIME",
            Self::Uri => "URI",
            Self::UtcOffset => "UTC-OFFSET",
        }
    }

    /// Parses a `VALUE` parameter (case-insensitive). X-names and IANA
    /// tokens this crate does not model yield `None`.
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "BINARY" => Self::Binary,
            "BOOLEAN" => Self::Boolean,
            "CAL-ADDRESS" => Self::CalAddress,
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "PERIOD" => Self::Period,
            "RECUR" => Self::Recur,
            "TEXT" => Self::Text,
            "TIME" => Self::Time,
            "URI" => Self::Uri,
            "UTC-OFFSET" => Self::UtcOffset,
            _ => return None,
        })
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed property value.
///
/// `Unknown` holds raw wire text that was never decoded; it carries no type
/// and renders verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// BINARY value (raw bytes, base64 on the wire).
    Binary(Vec<u8>),
    /// BOOLEAN value.
    Boolean(bool),
    /// CAL-ADDRESS value (typically a `mailto:` URI).
    CalAddress(String),
    /// DATE value.
    Date(NaiveDate),
    /// DATE-TIME value.
    DateTime(DateTime),
    /// DURATION value.
    Duration(TimeDelta),
    /// FLOAT value. NaN and infinities have no wire form and are clamped
    /// when encoded.
    Float(f64),
    /// INTEGER value.
    Integer(i32),
    /// PERIOD value.
    Period(Period),
    /// RECUR value, kept as rule text (`FREQ=DAILY;COUNT=5`).
    Recur(String),
    /// TEXT value (unescaped).
    Text(String),
    /// TIME value.
    Time(Time),
    /// URI value.
    Uri(String),
    /// UTC-OFFSET value.
    UtcOffset(FixedOffset),
    /// Comma-separated list of values sharing one type.
    List(Vec<Value>),
    /// Raw, undecoded wire text.
    Unknown(String),
}

impl Value {
    /// Creates a TEXT list (e.g. CATEGORIES).
    #[must_use]
    pub fn text_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Self::Text(s.into())).collect())
    }

    /// Returns the type this value knows itself to be.
    ///
    /// Lists report the type of their first element; `Unknown` and empty
    /// lists report `None`.
    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Self::Binary(_) => ValueType::Binary,
            Self::Boolean(_) => ValueType::Boolean,
            Self::CalAddress(_) => ValueType::CalAddress,
            Self::Date(_) => ValueType::Date,
            Self::DateTime(_) => ValueType::DateTime,
            Self::Duration(_) => ValueType::Duration,
            Self::Float(_) => ValueType::Float,
            Self::Integer(_) => ValueType::Integer,
            Self::Period(_) => ValueType::Period,
            Self::Recur(_) => ValueType::Recur,
            Self::Text(_) => ValueType::Text,
            Self::Time(_) => ValueType::Time,
            Self::Uri(_) => ValueType::Uri,
            Self::UtcOffset(_) => ValueType::UtcOffset,
            Self::List(items) => return items.first().and_then(Self::value_type),
            Self::Unknown(_) => return None,
        })
    }

    /// Returns this value as text, if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns this value as an integer, if it is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the raw wire text of an undecoded value.
    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Unknown(raw) => Some(raw),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(DateTime::floating(dt))
    }
}

impl From<chrono::DateTime<Utc>> for Value {
    fn from(dt: chrono::DateTime<Utc>) -> Self {
        Self::DateTime(DateTime::from(dt))
    }
}

impl From<DateTime> for Value {
    fn from(dt: DateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<TimeDelta> for Value {
    fn from(d: TimeDelta) -> Self {
        Self::Duration(d)
    }
}

impl From<Period> for Value {
    fn from(p: Period) -> Self {
        Self::Period(p)
    }
}

impl From<FixedOffset> for Value {
    fn from(offset: FixedOffset) -> Self {
        Self::UtcOffset(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_round_trips_through_param() {
        for vt in [
            ValueType::Binary,
            ValueType::CalAddress,
            ValueType::DateTime,
            ValueType::UtcOffset,
        ] {
            assert_eq!(ValueType::from_param(vt.as_str()), Some(vt));
        }
        assert_eq!(ValueType::from_param("date"), Some(ValueType::Date));
        assert_eq!(ValueType::from_param("X-SOMETHING"), None);
    }

    #[test]
    fn list_reports_first_item_type() {
        let list = Value::text_list(["Alpha", "Beta"]);
        assert_eq!(list.value_type(), Some(ValueType::Text));
        assert_eq!(Value::List(Vec::new()).value_type(), None);
        assert_eq!(Value::Unknown("x".into()).value_type(), None);
    }
}

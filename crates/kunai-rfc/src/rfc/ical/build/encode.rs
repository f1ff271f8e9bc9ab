//! Wire encoding of values and parameters.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{FixedOffset, TimeDelta};

use super::escape::{escape_param_value, escape_text};
use crate::rfc::ical::core::{Parameter, Period, PropertyValue, Value, ValueType};

const SECONDS_PER_WEEK: u64 = 7 * 86_400;

impl Value {
    /// Encodes the value part of a content line (everything after `:`).
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Binary(bytes) => BASE64.encode(bytes),
            Self::Boolean(true) => "TRUE".to_string(),
            Self::Boolean(false) => "FALSE".to_string(),
            Self::CalAddress(s) | Self::Recur(s) | Self::Uri(s) | Self::Unknown(s) => s.clone(),
            Self::Date(date) => date.format("%Y%m%d").to_string(),
            Self::DateTime(dt) => dt.to_string(),
            Self::Duration(d) => encode_duration(*d),
            Self::Float(f) => encode_float(*f),
            Self::Integer(n) => n.to_string(),
            Self::Period(period) => encode_period(period),
            Self::Text(s) => escape_text(s).into_owned(),
            Self::Time(t) => t.to_string(),
            Self::UtcOffset(offset) => encode_utc_offset(*offset),
            Self::List(items) => items.iter().map(Self::encode).collect::<Vec<_>>().join(","),
        }
    }

    /// TZID a zoned date-time (or a list/period starting with one) refers to.
    fn tzid(&self) -> Option<&str> {
        match self {
            Self::DateTime(dt) => dt.tzid(),
            Self::Period(period) => period.start().tzid(),
            Self::List(items) => items.first()?.tzid(),
            _ => None,
        }
    }
}

impl PropertyValue {
    /// Encodes parameters and value as `[;PARAM=...]*:VALUE`.
    ///
    /// `default_type` is the type the property assumes when no `VALUE`
    /// parameter is given; `None` stands for TEXT. A `VALUE` parameter is
    /// added when the value's own type differs from it.
    #[must_use]
    pub fn to_wire_text(&self, default_type: Option<ValueType>) -> String {
        let mut out = String::new();

        if let Some(own) = self.value.value_type()
            && own != default_type.unwrap_or(ValueType::Text)
            && self.get_param("VALUE").is_none()
        {
            push_param(&mut out, "VALUE", &[own.as_str()]);
        }
        if let Some(tzid) = self.value.tzid()
            && self.get_param("TZID").is_none()
        {
            push_param(&mut out, "TZID", &[tzid]);
        }
        if matches!(self.value, Value::Binary(_)) && self.get_param("ENCODING").is_none() {
            push_param(&mut out, "ENCODING", &["BASE64"]);
        }
        for param in &self.params {
            push_parameter(&mut out, param);
        }

        out.push(':');
        out.push_str(&self.value.encode());
        out
    }
}

fn push_parameter(out: &mut String, param: &Parameter) {
    let values: Vec<&str> = param.values.iter().map(String::as_str).collect();
    push_param(out, &param.name, &values);
}

fn push_param(out: &mut String, name: &str, values: &[&str]) {
    out.push(';');
    out.push_str(name);
    out.push('=');
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_param_value(value));
    }
}

/// Encodes a DURATION (RFC 5545 §3.3.6).
///
/// Whole weeks use the `PnW` form; otherwise zero fields are omitted.
/// Sub-second precision is dropped.
#[must_use]
pub fn encode_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds().unsigned_abs();
    if total == 0 {
        return "PT0S".to_string();
    }

    let mut out = String::new();
    if duration < TimeDelta::zero() {
        out.push('-');
    }
    out.push('P');

    if total % SECONDS_PER_WEEK == 0 {
        out.push_str(&format!("{}W", total / SECONDS_PER_WEEK));
        return out;
    }

    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;

    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours + minutes + seconds > 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if seconds > 0 {
            out.push_str(&format!("{seconds}S"));
        }
    }
    out
}

/// FLOAT has no spelling for NaN or infinities. NaN becomes `0` and the
/// infinities clamp to the largest finite magnitude.
fn encode_float(f: f64) -> String {
    if f.is_finite() {
        return f.to_string();
    }
    tracing::warn!(value = %f, "Non-finite FLOAT clamped");
    let clamped = if f.is_nan() {
        0.0
    } else {
        f64::MAX.copysign(f)
    };
    clamped.to_string()
}

/// Encodes a UTC-OFFSET as `±HHMM`, with seconds only when non-zero.
#[must_use]
pub fn encode_utc_offset(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.unsigned_abs();
    let (hours, minutes, seconds) = (secs / 3_600, secs % 3_600 / 60, secs % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}{minutes:02}")
    } else {
        format!("{sign}{hours:02}{minutes:02}{seconds:02}")
    }
}

fn encode_period(period: &Period) -> String {
    match period {
        Period::Explicit { start, end } => format!("{start}/{end}"),
        Period::Duration { start, duration } => {
            format!("{start}/{}", encode_duration(*duration))
        }
    }
}

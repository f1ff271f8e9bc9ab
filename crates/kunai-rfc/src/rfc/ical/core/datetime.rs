//! iCalendar DATE-TIME, TIME and PERIOD value types (RFC 5545 §3.3.5, §3.3.9, §3.3.12).

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// How a DATE-TIME relates to a timezone (RFC 5545 §3.3.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeForm {
    /// `19980118T230000`: wall-clock time wherever the reader is.
    Floating,

    /// `19980119T070000Z`
    Utc,

    /// `TZID=America/New_York:19980119T020000`; the renderer emits the
    /// `TZID` parameter.
    Zoned { tzid: String },
}

/// A DATE-TIME value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    /// Wall-clock date and time.
    pub local: NaiveDateTime,
    pub form: DateTimeForm,
}

impl DateTime {
    #[must_use]
    pub const fn floating(local: NaiveDateTime) -> Self {
        Self {
            local,
            form: DateTimeForm::Floating,
        }
    }

    #[must_use]
    pub const fn utc(local: NaiveDateTime) -> Self {
        Self {
            local,
            form: DateTimeForm::Utc,
        }
    }

    /// Creates a DATE-TIME bound to a TZID.
    #[must_use]
    pub fn zoned(local: NaiveDateTime, tzid: impl Into<String>) -> Self {
        Self {
            local,
            form: DateTimeForm::Zoned { tzid: tzid.into() },
        }
    }

    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            _ => None,
        }
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(dt: chrono::DateTime<Utc>) -> Self {
        Self::utc(dt.naive_utc())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y%m%dT%H%M%S"))?;
        if self.form == DateTimeForm::Utc {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// A TIME value (RFC 5545 §3.3.12).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub time: NaiveTime,
    /// Rendered with a trailing `Z`.
    pub is_utc: bool,
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format("%H%M%S"))?;
        if self.is_utc {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// A PERIOD value (RFC 5545 §3.3.9), `start/end` or `start/duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    Explicit { start: DateTime, end: DateTime },
    Duration { start: DateTime, duration: TimeDelta },
}

impl Period {
    #[must_use]
    pub fn start(&self) -> &DateTime {
        match self {
            Self::Explicit { start, .. } | Self::Duration { start, .. } => start,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 23)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    #[test]
    fn datetime_display_forms() {
        assert_eq!(DateTime::floating(at(9, 30)).to_string(), "20260123T093000");
        assert_eq!(DateTime::utc(at(9, 30)).to_string(), "20260123T093000Z");
        let zoned = DateTime::zoned(at(9, 30), "Europe/Berlin");
        assert_eq!(zoned.to_string(), "20260123T093000");
        assert_eq!(zoned.tzid(), Some("Europe/Berlin"));
    }

    #[test]
    fn time_display() {
        let t = Time {
            time: NaiveTime::from_hms_opt(7, 5, 9).unwrap(),
            is_utc: true,
        };
        assert_eq!(t.to_string(), "070509Z");
    }
}

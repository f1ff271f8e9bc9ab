//! iCalendar (RFC 5545) component model, renderer and parser.

pub mod error;
pub mod rfc;

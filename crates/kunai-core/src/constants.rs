/// Product name used in generated identifiers.
pub const PRODUCT_NAME: &str = "kunai";

/// Crate version baked in at build time.
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `PRODID` written into new calendars (RFC 5545 §3.7.3).
pub const DEFAULT_PRODID: &str =
    const_str::concat!("-//", PRODUCT_NAME, "//", PRODUCT_NAME, " ", PRODUCT_VERSION, "//EN");

/// Default `VERSION` written into new calendars.
pub const ICALENDAR_VERSION: &str = "2.0";

/// Prefix of environment variables read by [`crate::config::Settings::load`].
pub const ENV_PREFIX: &str = "KUNAI";

/// Optional configuration file read by [`crate::config::Settings::load`].
pub const CONFIG_FILE: &str = "kunai.toml";

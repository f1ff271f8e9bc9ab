use anyhow::Result;
use config::{Config, FileFormat};
use serde::Deserialize;

use crate::constants::{CONFIG_FILE, ENV_PREFIX};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub render: RenderConfig,
    pub parse: ParseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Continuation indent written after each fold. RFC 5545 allows a single
    /// SPACE or HTAB.
    pub fold_indent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    /// Retry a failed parse once after repairing known-bad line wrapping.
    pub recover_bad_wrapping: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderConfig {
                fold_indent: " ".to_string(),
            },
            parse: ParseConfig {
                recover_bad_wrapping: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `kunai.toml` and
    /// `KUNAI_`-prefixed environment variables (`__` separates nested keys).
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Loads configuration from TOML text layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the TOML is malformed or does not deserialize.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Self::default();
        Ok(Config::builder()
            .set_default("render.fold_indent", defaults.render.fold_indent)?
            .set_default(
                "parse.recover_bad_wrapping",
                defaults.parse.recover_bad_wrapping,
            )?
            .set_default("logging.level", defaults.logging.level)?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests;

//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Installs a formatted `tracing` subscriber filtered by `config.level`.
///
/// `RUST_LOG` wins over the configured level when it is set. Calling this
/// more than once is harmless: later calls leave the first subscriber in place.
///
/// ## Errors
/// Returns an error if the level is not a valid filter directive.
pub fn init_logging(config: &LoggingConfig) -> CoreResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            CoreError::ConfigError(format!("invalid logging level {:?}: {e}", config.level))
        })?,
    };

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_accepts_directive() {
        let config = LoggingConfig {
            level: "kunai_rfc=debug,info".to_string(),
        };
        assert!(init_logging(&config).is_ok());
        // Second call keeps the installed subscriber.
        assert!(init_logging(&config).is_ok());
    }
}

//! Tracing subscriber installation for the server binary

use auth_shared::config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, ParseError};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter {directive:?}: {source}")]
    Filter {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("Could not install the tracing subscriber: {0}")]
    Install(String),
}

/// Parses the configured filter directive (`RUST_LOG` syntax)
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.level).map_err(|source| TelemetryError::Filter {
        directive: config.level.clone(),
        source,
    })
}

/// Installs the global subscriber: JSON lines or human-readable output
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    installed.map_err(|e| TelemetryError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: LogFormat::Pretty,
        }
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter(&config("info")).is_ok());
        assert!(build_filter(&config("auth_core=debug,sqlx=warn")).is_ok());
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let err = build_filter(&config("auth_core=loud")).unwrap_err();
        assert!(matches!(err, TelemetryError::Filter { ref directive, .. } if directive == "auth_core=loud"));
    }
}

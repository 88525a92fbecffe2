use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use super::config::{LogFormat, LogLevel};

#[derive(Debug, Clone, Error)]
pub enum LoggingError {
    #[error("failed to install global subscriber: {0}")]
    Install(String),
}

static INIT: OnceLock<Result<(), LoggingError>> = OnceLock::new();

/// Filter for the configured level. `RUST_LOG` wins when set.
fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Installs the global subscriber once; later calls return the first outcome.
/// Log lines go to stderr so stdout carries only the command's output.
pub fn init(level: LogLevel, format: LogFormat) -> Result<(), LoggingError> {
    INIT.get_or_init(|| {
        let filter = env_filter(level);
        let registry = tracing_subscriber::registry().with(filter);

        let installed = match format {
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .compact(),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .json(),
                )
                .try_init(),
        };

        installed.map_err(|e| LoggingError::Install(e.to_string()))
    })
    .clone()
}

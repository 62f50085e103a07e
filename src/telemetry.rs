//! Logging configuration and subscriber installation.
//!
//! Courier emits diagnostics through `tracing`. Binaries and test harnesses
//! embedding the crate call [`init_tracing`] once at startup; the
//! `RUST_LOG` environment variable takes precedence over the configured
//! level.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Minimum level of emitted log events.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Very verbose diagnostics.
    Trace,
    /// Debugging information.
    Debug,
    /// Normal operation.
    #[default]
    Info,
    /// Warnings only.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Output format of log events.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Console,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
///
/// ```json
/// { "level": "debug", "format": "json" }
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level; defaults to `info`.
    pub level: LogLevel,
    /// Output format; defaults to `console`.
    pub format: LogFormat,
}

/// Errors returned while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level directive could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialised,
}

/// Builds the event filter, preferring `RUST_LOG` when it is set.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the configured level does
/// not form a valid directive.
pub fn build_filter(config: &LogConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(config.level.as_str())
            .map_err(|err| TelemetryError::InvalidFilter(err.to_string()))
    })
}

/// Installs the global `tracing` subscriber described by `config`.
///
/// # Errors
///
/// Returns [`TelemetryError::AlreadyInitialised`] when called a second time
/// in the same process, or [`TelemetryError::InvalidFilter`] when the level
/// directive is rejected.
pub fn init_tracing(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Console => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|_| TelemetryError::AlreadyInitialised)
}

//! Error types for configuration and factory operations.

use super::TransportConfigId;
use crate::formatting::domain::FormatterError;
use crate::history::ports::StoreError;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors returned while validating configuration or building endpoints.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A required text field is blank.
    #[error("configuration field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// Checkpointing was enabled without storage settings.
    #[error("checkpoints are enabled but no checkpoint storage is configured")]
    MissingCheckpointStorage,

    /// No configuration has the requested id.
    #[error("unknown transport configuration: {0}")]
    UnknownTransport(TransportConfigId),

    /// A formatter could not be built.
    #[error(transparent)]
    Formatter(#[from] FormatterError),

    /// Configuration persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

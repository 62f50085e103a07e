//! Transport endpoint construction contract.

use crate::config::domain::{ConfigResult, TransportConfig};
use crate::transport::ports::{ConsumerTransport, ProducerTransport};

/// Creates transport endpoints for a configuration.
///
/// Endpoints connect lazily, so construction does no I/O.
pub trait TransportConnector: Send + Sync {
    /// Send-side endpoint type.
    type Producer: ProducerTransport + 'static;
    /// Receive-side endpoint type.
    type Consumer: ConsumerTransport + 'static;

    /// Creates the send-side endpoint for `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::config::domain::ConfigError`] when the
    /// configuration cannot be used.
    fn producer(&self, config: &TransportConfig) -> ConfigResult<Self::Producer>;

    /// Creates the receive-side endpoint for `config`, checkpointing
    /// progress when the configuration enables it.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::config::domain::ConfigError`] when the
    /// configuration cannot be used.
    fn consumer(&self, config: &TransportConfig) -> ConfigResult<Self::Consumer>;
}

//! Receive-side transport contract.

use super::TransportResult;
use crate::transport::domain::ReceivedMessage;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Callback invoked once per received message, in delivery order.
pub type MessageHandler = Arc<dyn Fn(ReceivedMessage) + Send + Sync>;

/// Transport provider for incoming messages.
#[async_trait]
pub trait ConsumerTransport: Send + Sync {
    /// Registers `handler` and begins delivering messages to it.
    ///
    /// Returns once the registration is active. Delivery stops when
    /// [`Self::stop_receiving`] is called or `cancellation` fires.
    ///
    /// # Errors
    ///
    /// Returns [`super::TransportError::StartFailed`] or a provider error
    /// when the receive loop cannot be started.
    async fn start_receiving(
        &self,
        handler: MessageHandler,
        cancellation: CancellationToken,
    ) -> TransportResult<()>;

    /// Stops delivering messages to the registered handler.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the receive loop fails to stop.
    async fn stop_receiving(&self) -> TransportResult<()>;
}

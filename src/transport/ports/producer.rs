//! Send-side transport contract.

use super::{TransportError, TransportResult};
use crate::transport::domain::Payload;
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Summary of a delayed send loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedDelivery {
    /// Payloads accepted by the transport.
    pub delivered: usize,
    /// Payloads requested.
    pub total: usize,
    /// Whether the loop stopped early because of cancellation.
    pub cancelled: bool,
}

impl DelayedDelivery {
    const fn stopped(delivered: usize, total: usize) -> Self {
        Self {
            delivered,
            total,
            cancelled: true,
        }
    }
}

/// Transport provider for outgoing messages.
///
/// Implementations open their connection lazily and release it once in
/// [`Self::dispose`].
#[async_trait]
pub trait ProducerTransport: Send + Sync {
    /// Sends a single payload.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Cancelled`] when `cancellation` fires first,
    /// [`TransportError::MessageTooLarge`] for an oversized payload, or a
    /// provider error.
    async fn send_one(
        &self,
        payload: Payload,
        cancellation: &CancellationToken,
    ) -> TransportResult<()>;

    /// Sends every payload in one transport call.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::BatchCapacityExceeded`] when the payloads do
    /// not fit in a single batch; nothing is sent in that case.
    async fn send_batch(
        &self,
        payloads: Vec<Payload>,
        cancellation: &CancellationToken,
    ) -> TransportResult<()>;

    /// Sends payloads one at a time, waiting `delay` between sends.
    ///
    /// Cancellation is checked before every send and interrupts the wait.
    /// A cancelled loop is reported through [`DelayedDelivery::cancelled`]
    /// rather than as an error; payloads already sent stay sent.
    ///
    /// # Errors
    ///
    /// Returns the first non-cancellation error raised by [`Self::send_one`].
    async fn send_with_delay(
        &self,
        payloads: Vec<Payload>,
        delay: Duration,
        cancellation: &CancellationToken,
    ) -> TransportResult<DelayedDelivery> {
        let total = payloads.len();
        let mut delivered = 0;
        for (position, payload) in payloads.into_iter().enumerate() {
            if position > 0 {
                tokio::select! {
                    biased;
                    () = cancellation.cancelled() => {
                        return Ok(DelayedDelivery::stopped(delivered, total));
                    }
                    () = tokio::time::sleep(delay) => {}
                }
            }
            if cancellation.is_cancelled() {
                return Ok(DelayedDelivery::stopped(delivered, total));
            }
            match self.send_one(payload, cancellation).await {
                Ok(()) => delivered += 1,
                Err(TransportError::Cancelled) => {
                    return Ok(DelayedDelivery::stopped(delivered, total));
                }
                Err(err) => return Err(err),
            }
            debug!(delivered, total, "delayed send progressed");
        }
        Ok(DelayedDelivery {
            delivered,
            total,
            cancelled: false,
        })
    }

    /// Releases the transport connection.
    ///
    /// Calling this more than once, or before anything was sent, has no
    /// further effect.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the connection fails to close.
    async fn dispose(&self) -> TransportResult<()>;
}

//! In-memory receive-side transport.

use crate::transport::{
    domain::{PartitionId, Payload, ReceivedMessage},
    ports::{ConsumerTransport, MessageHandler, TransportError, TransportResult},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Default)]
struct ConsumerState {
    registration: Option<Registration>,
    backlog: VecDeque<ReceivedMessage>,
    flushing: bool,
    registrations: usize,
    stops: usize,
    next_sequence: i64,
    fail_next_start: Option<String>,
}

struct Registration {
    handler: MessageHandler,
    cancellation: CancellationToken,
}

impl ConsumerState {
    fn live_handler(&mut self) -> Option<MessageHandler> {
        if self
            .registration
            .as_ref()
            .is_some_and(|registration| registration.cancellation.is_cancelled())
        {
            self.registration = None;
        }
        self.registration
            .as_ref()
            .map(|registration| Arc::clone(&registration.handler))
    }
}

/// Thread-safe in-memory consumer transport fed by tests.
///
/// Messages published while no handler is registered are held back and
/// delivered, in publish order, as soon as a handler registers. Messages
/// published while that backlog is being delivered queue behind it. Clones
/// share the same state.
#[derive(Clone, Default)]
pub struct InMemoryConsumerTransport {
    state: Arc<Mutex<ConsumerState>>,
    start_latency: Option<Duration>,
}

impl InMemoryConsumerTransport {
    /// Creates an idle transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that waits `latency` before each registration
    /// completes.
    #[must_use]
    pub fn with_start_latency(latency: Duration) -> Self {
        Self {
            start_latency: Some(latency),
            ..Self::default()
        }
    }

    fn lock(&self) -> TransportResult<MutexGuard<'_, ConsumerState>> {
        self.state
            .lock()
            .map_err(|err| TransportError::provider(std::io::Error::other(err.to_string())))
    }

    /// Delivers `message` to the registered handler, or holds it back until
    /// one registers.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn publish(&self, message: ReceivedMessage) -> TransportResult<()> {
        let handler = {
            let mut state = self.lock()?;
            match state.live_handler() {
                Some(handler) if state.backlog.is_empty() && !state.flushing => handler,
                _ => {
                    state.backlog.push_back(message);
                    return Ok(());
                }
            }
        };
        handler(message);
        Ok(())
    }

    /// Publishes a text payload on partition `0` with the next sequence
    /// number.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn publish_text(&self, text: &str) -> TransportResult<()> {
        self.publish_payload(Payload::Text(text.to_owned()))
    }

    /// Publishes `payload` on partition `0` with the next sequence number.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn publish_payload(&self, payload: Payload) -> TransportResult<()> {
        let sequence_number = {
            let mut state = self.lock()?;
            let sequence_number = state.next_sequence;
            state.next_sequence += 1;
            sequence_number
        };
        self.publish(ReceivedMessage::new(
            payload,
            PartitionId::from("0"),
            sequence_number,
            Utc::now(),
        ))
    }

    /// Makes the next [`ConsumerTransport::start_receiving`] call fail with
    /// `reason`.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn fail_next_start(&self, reason: impl Into<String>) -> TransportResult<()> {
        self.lock()?.fail_next_start = Some(reason.into());
        Ok(())
    }

    /// Returns how many handlers have been registered.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn registrations(&self) -> TransportResult<usize> {
        Ok(self.lock()?.registrations)
    }

    /// Returns how many times receiving was stopped.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn stops(&self) -> TransportResult<usize> {
        Ok(self.lock()?.stops)
    }

    /// Returns whether a live handler is registered.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn is_receiving(&self) -> TransportResult<bool> {
        Ok(self.lock()?.live_handler().is_some())
    }
}

#[async_trait]
impl ConsumerTransport for InMemoryConsumerTransport {
    async fn start_receiving(
        &self,
        handler: MessageHandler,
        cancellation: CancellationToken,
    ) -> TransportResult<()> {
        if let Some(latency) = self.start_latency {
            tokio::time::sleep(latency).await;
        }
        let backlog = {
            let mut state = self.lock()?;
            if let Some(reason) = state.fail_next_start.take() {
                return Err(TransportError::StartFailed(reason));
            }
            state.registrations += 1;
            state.registration = Some(Registration {
                handler: Arc::clone(&handler),
                cancellation,
            });
            state.flushing = true;
            state.backlog.len()
        };
        debug!(backlog, "in-memory consumer registered");
        loop {
            // The handler runs outside the lock; publishes queue meanwhile.
            let next = {
                let mut state = self.lock()?;
                let next = match state.live_handler() {
                    Some(_) => state.backlog.pop_front(),
                    None => None,
                };
                if next.is_none() {
                    state.flushing = false;
                }
                next
            };
            let Some(message) = next else {
                return Ok(());
            };
            handler(message);
        }
    }

    async fn stop_receiving(&self) -> TransportResult<()> {
        let mut state = self.lock()?;
        state.registration = None;
        state.stops += 1;
        Ok(())
    }
}

//! In-memory send-side transport.

use crate::transport::{
    domain::Payload,
    ports::{ProducerTransport, TransportError, TransportResult},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendCall {
    /// A single-message send.
    One(Payload),
    /// A batch send.
    Batch(Vec<Payload>),
}

impl SendCall {
    /// Returns the payloads carried by this call.
    #[must_use]
    pub fn payloads(&self) -> &[Payload] {
        match self {
            Self::One(payload) => std::slice::from_ref(payload),
            Self::Batch(payloads) => payloads,
        }
    }
}

/// Optional size limits enforced by the in-memory transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportLimits {
    /// Largest accepted payload in bytes.
    pub max_message_bytes: Option<usize>,
    /// Largest accepted batch in bytes.
    pub max_batch_bytes: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Connection {
    #[default]
    Closed,
    Open,
    Released,
}

#[derive(Debug, Default)]
struct ProducerState {
    calls: Vec<SendCall>,
    connection: Connection,
    opened: usize,
    released: usize,
}

impl ProducerState {
    fn ensure_open(&mut self) -> TransportResult<()> {
        match self.connection {
            Connection::Released => Err(TransportError::Disposed),
            Connection::Open => Ok(()),
            Connection::Closed => {
                self.connection = Connection::Open;
                self.opened += 1;
                debug!("in-memory producer connection opened");
                Ok(())
            }
        }
    }
}

/// Thread-safe in-memory producer transport that records send calls.
///
/// Clones share the same recorded state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProducerTransport {
    state: Arc<RwLock<ProducerState>>,
    limits: TransportLimits,
}

impl InMemoryProducerTransport {
    /// Creates a transport without size limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport enforcing `limits`.
    #[must_use]
    pub fn with_limits(limits: TransportLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    fn read(&self) -> TransportResult<RwLockReadGuard<'_, ProducerState>> {
        self.state
            .read()
            .map_err(|err| TransportError::provider(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TransportResult<RwLockWriteGuard<'_, ProducerState>> {
        self.state
            .write()
            .map_err(|err| TransportError::provider(std::io::Error::other(err.to_string())))
    }

    /// Returns every recorded send call in order.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn calls(&self) -> TransportResult<Vec<SendCall>> {
        Ok(self.read()?.calls.clone())
    }

    /// Returns every sent payload in order, flattening batches.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn sent_payloads(&self) -> TransportResult<Vec<Payload>> {
        Ok(self
            .read()?
            .calls
            .iter()
            .flat_map(|call| call.payloads().iter().cloned())
            .collect())
    }

    /// Returns how many times the connection was opened.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn connections_opened(&self) -> TransportResult<usize> {
        Ok(self.read()?.opened)
    }

    /// Returns how many times an open connection was released.
    ///
    /// # Errors
    ///
    /// Returns a provider error when the state lock is poisoned.
    pub fn connections_released(&self) -> TransportResult<usize> {
        Ok(self.read()?.released)
    }

    fn check_message(&self, payload: &Payload) -> TransportResult<()> {
        match self.limits.max_message_bytes {
            Some(limit) if payload.len() > limit => Err(TransportError::MessageTooLarge {
                size: payload.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn check_batch(&self, payloads: &[Payload]) -> TransportResult<()> {
        for payload in payloads {
            self.check_message(payload)?;
        }
        let Some(limit) = self.limits.max_batch_bytes else {
            return Ok(());
        };
        let mut used = 0;
        for (accepted, payload) in payloads.iter().enumerate() {
            used += payload.len();
            if used > limit {
                return Err(TransportError::BatchCapacityExceeded {
                    accepted,
                    requested: payloads.len(),
                    limit,
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProducerTransport for InMemoryProducerTransport {
    async fn send_one(
        &self,
        payload: Payload,
        cancellation: &CancellationToken,
    ) -> TransportResult<()> {
        if cancellation.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        let mut state = self.write()?;
        state.ensure_open()?;
        self.check_message(&payload)?;
        state.calls.push(SendCall::One(payload));
        Ok(())
    }

    async fn send_batch(
        &self,
        payloads: Vec<Payload>,
        cancellation: &CancellationToken,
    ) -> TransportResult<()> {
        if cancellation.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        let mut state = self.write()?;
        state.ensure_open()?;
        self.check_batch(&payloads)?;
        state.calls.push(SendCall::Batch(payloads));
        Ok(())
    }

    async fn dispose(&self) -> TransportResult<()> {
        let mut state = self.write()?;
        if state.connection == Connection::Open {
            state.released += 1;
            debug!("in-memory producer connection released");
        }
        state.connection = Connection::Released;
        Ok(())
    }
}

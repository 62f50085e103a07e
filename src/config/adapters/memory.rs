//! In-memory transport connector.

use crate::config::{
    domain::{ConfigResult, TransportConfig, TransportConfigId},
    ports::TransportConnector,
};
use crate::transport::adapters::memory::{
    InMemoryConsumerTransport, InMemoryProducerTransport, TransportLimits,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct ConnectorState {
    producers: HashMap<TransportConfigId, InMemoryProducerTransport>,
    consumers: HashMap<TransportConfigId, ConsumerEndpoint>,
}

#[derive(Clone)]
struct ConsumerEndpoint {
    transport: InMemoryConsumerTransport,
    checkpointed: bool,
}

impl std::fmt::Debug for ConsumerEndpoint {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ConsumerEndpoint")
            .field("checkpointed", &self.checkpointed)
            .finish_non_exhaustive()
    }
}

/// Connector handing out in-memory transports, one pair per configuration.
///
/// Repeated requests for the same configuration return handles to the same
/// transport, so tests can publish to and inspect what a factory-built
/// producer or consumer uses.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnector {
    state: Arc<Mutex<ConnectorState>>,
    limits: TransportLimits,
}

impl InMemoryConnector {
    /// Creates a connector without transport size limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a connector whose producer transports enforce `limits`.
    #[must_use]
    pub fn with_limits(limits: TransportLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    // Entries are inserted whole, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, ConnectorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the producer transport created for `id`.
    #[must_use]
    pub fn producer_for(&self, id: TransportConfigId) -> Option<InMemoryProducerTransport> {
        self.lock().producers.get(&id).cloned()
    }

    /// Returns the consumer transport created for `id`.
    #[must_use]
    pub fn consumer_for(&self, id: TransportConfigId) -> Option<InMemoryConsumerTransport> {
        self.lock()
            .consumers
            .get(&id)
            .map(|endpoint| endpoint.transport.clone())
    }

    /// Returns whether the consumer created for `id` checkpoints progress.
    #[must_use]
    pub fn is_checkpointed(&self, id: TransportConfigId) -> Option<bool> {
        self.lock()
            .consumers
            .get(&id)
            .map(|endpoint| endpoint.checkpointed)
    }
}

impl TransportConnector for InMemoryConnector {
    type Producer = InMemoryProducerTransport;
    type Consumer = InMemoryConsumerTransport;

    fn producer(&self, config: &TransportConfig) -> ConfigResult<Self::Producer> {
        config.validate()?;
        let limits = self.limits;
        Ok(self
            .lock()
            .producers
            .entry(config.id())
            .or_insert_with(|| InMemoryProducerTransport::with_limits(limits))
            .clone())
    }

    fn consumer(&self, config: &TransportConfig) -> ConfigResult<Self::Consumer> {
        config.validate()?;
        let endpoint = self
            .lock()
            .consumers
            .entry(config.id())
            .or_insert_with(|| ConsumerEndpoint {
                transport: InMemoryConsumerTransport::new(),
                checkpointed: config.use_checkpoints(),
            })
            .clone();
        Ok(endpoint.transport)
    }
}

//! Shared world state for message pipeline BDD scenarios.

use crate::test_helpers::factory_for;
use courier::config::{
    adapters::InMemoryConnector,
    domain::{TransportConfig, TransportConfigId},
    services::MessagingFactory,
};
use courier::consumer::services::{MessageConsumerBridge, MessageStream};
use courier::producer::{
    domain::{ProducerResult, SendOutcome},
    services::MessageProducer,
};
use courier::transport::adapters::memory::{InMemoryConsumerTransport, InMemoryProducerTransport};
use courier::transport::domain::ReceivedMessage;
use futures::StreamExt;
use rstest::fixture;
use std::time::Duration;
use tokio::time::timeout;

/// Producer type built for scenarios.
pub type Producer = MessageProducer<InMemoryProducerTransport>;

/// Consumer bridge type built for scenarios.
pub type Consumer = MessageConsumerBridge<InMemoryConsumerTransport>;

/// Scenario world for message pipeline behaviour tests.
#[derive(Default)]
pub struct MessageWorld {
    /// Connector shared by every endpoint in the scenario.
    pub connector: InMemoryConnector,
    /// Configurations registered by name.
    pub configs: Vec<(String, TransportConfig)>,
    /// Factory built on first use from `configs`.
    pub factory: Option<MessagingFactory<InMemoryConnector>>,
    /// Producer used by the last send.
    pub producer: Option<Producer>,
    /// Running consumer bridge.
    pub consumer: Option<Consumer>,
    /// Stream returned by the running consumer.
    pub stream: Option<MessageStream>,
    /// Result of the last send.
    pub last_send: Option<ProducerResult<SendOutcome>>,
}

impl MessageWorld {
    /// Registers `config` under `name`.
    pub fn register(&mut self, name: String, config: TransportConfig) {
        self.configs.push((name, config));
    }

    /// Returns the configuration id registered under `name`.
    pub fn id_of(&self, name: &str) -> Result<TransportConfigId, eyre::Report> {
        self.configs
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, config)| config.id())
            .ok_or_else(|| eyre::eyre!("no transport named '{name}' in scenario world"))
    }

    /// Returns the factory, building it from the registered configurations.
    pub fn factory(&mut self) -> &MessagingFactory<InMemoryConnector> {
        let configs = self.configs.iter().map(|(_, config)| config.clone());
        let connector = self.connector.clone();
        self.factory
            .get_or_insert_with(|| factory_for(configs, connector))
    }

    /// Pulls the next received message from the running stream.
    pub fn next_message(&mut self) -> Result<ReceivedMessage, eyre::Report> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| eyre::eyre!("no consumer is receiving"))?;
        run_async(timeout(Duration::from_secs(5), stream.next()))
            .map_err(|_| eyre::eyre!("timed out waiting for a message"))?
            .ok_or_else(|| eyre::eyre!("stream ended early"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MessageWorld {
    MessageWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

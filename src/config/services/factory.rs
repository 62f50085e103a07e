//! Producer and consumer construction from configuration.

use crate::config::{
    domain::{AppConfiguration, ConfigError, ConfigResult, TransportConfig, TransportConfigId},
    ports::TransportConnector,
};
use crate::consumer::services::MessageConsumerBridge;
use crate::formatting::{domain::FormatterPhase, services::FormatterCatalog};
use crate::producer::{adapters::strategy_for, services::MessageProducer};
use std::sync::Arc;
use tracing::info;

/// Builds producers and consumer bridges for configured transports.
///
/// Each call returns a new instance owning its own pipeline, so unrelated
/// configurations never share mutable state.
#[derive(Debug)]
pub struct MessagingFactory<C> {
    configuration: AppConfiguration,
    catalog: FormatterCatalog,
    connector: Arc<C>,
}

impl<C> MessagingFactory<C>
where
    C: TransportConnector,
{
    /// Creates a factory over `configuration`.
    #[must_use]
    pub const fn new(
        configuration: AppConfiguration,
        catalog: FormatterCatalog,
        connector: Arc<C>,
    ) -> Self {
        Self {
            configuration,
            catalog,
            connector,
        }
    }

    /// Returns the configuration this factory builds from.
    #[must_use]
    pub const fn configuration(&self) -> &AppConfiguration {
        &self.configuration
    }

    /// Returns the formatter catalog.
    #[must_use]
    pub const fn catalog(&self) -> &FormatterCatalog {
        &self.catalog
    }

    /// Returns the transport connector.
    #[must_use]
    pub const fn connector(&self) -> &Arc<C> {
        &self.connector
    }

    fn config(&self, id: TransportConfigId) -> ConfigResult<&TransportConfig> {
        self.configuration
            .find(id)
            .ok_or(ConfigError::UnknownTransport(id))
    }

    /// Builds a producer for the configuration `id`.
    ///
    /// The producer runs the configuration's enabled before-send
    /// formatters and encodes payloads according to its compression and
    /// base64 switches.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTransport`] for an unknown id, or the
    /// connector's error.
    pub fn create_producer(
        &self,
        id: TransportConfigId,
    ) -> ConfigResult<MessageProducer<C::Producer>> {
        let config = self.config(id)?;
        let transport = self.connector.producer(config)?;
        let pipeline = self
            .catalog
            .pipeline_for(FormatterPhase::BeforeSend, config.message_formatters());
        let options = config.encoding_options();
        info!(
            config = %id,
            formatters = ?pipeline.names(),
            binary = options.is_binary(),
            "producer created"
        );
        Ok(MessageProducer::new(
            Arc::new(transport),
            Arc::new(pipeline),
            strategy_for(options),
        ))
    }

    /// Builds a consumer bridge for the configuration `id`.
    ///
    /// The bridge runs the configuration's enabled after-receive
    /// formatters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTransport`] for an unknown id, or the
    /// connector's error.
    pub fn create_consumer(
        &self,
        id: TransportConfigId,
    ) -> ConfigResult<MessageConsumerBridge<C::Consumer>> {
        let config = self.config(id)?;
        let transport = self.connector.consumer(config)?;
        let pipeline = self
            .catalog
            .pipeline_for(FormatterPhase::AfterReceive, config.message_formatters());
        info!(config = %id, formatters = ?pipeline.names(), "consumer created");
        Ok(MessageConsumerBridge::new(
            Arc::new(transport),
            Arc::new(pipeline),
        ))
    }
}

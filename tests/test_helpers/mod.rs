//! Shared fixtures for integration tests.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use courier::config::{
    adapters::InMemoryConnector,
    domain::{AppConfiguration, TransportConfig, TransportConfigId},
    services::MessagingFactory,
};
use courier::formatting::services::FormatterCatalog;
use courier::transport::ports::TransportResult;
use mockable::Clock;
use std::sync::Arc;

/// Clock frozen at 2024-02-29 09:08:07 local time.
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock {
    local: DateTime<Local>,
}

impl FrozenClock {
    /// Creates the frozen clock.
    ///
    /// # Panics
    ///
    /// Panics when the fixture time does not exist in the local zone.
    pub fn leap_day() -> Self {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|date| date.and_hms_opt(9, 8, 7))
            .expect("valid fixture time");
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("fixture time exists locally");
        Self { local }
    }
}

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.local
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }
}

/// Builds a factory over `configs` using the built-in formatters and a
/// frozen clock.
///
/// # Panics
///
/// Panics when a configuration is invalid.
pub fn factory_for(
    configs: impl IntoIterator<Item = TransportConfig>,
    connector: InMemoryConnector,
) -> MessagingFactory<InMemoryConnector> {
    let mut configuration = AppConfiguration::new();
    for config in configs {
        configuration.upsert(config).expect("valid configuration");
    }
    let catalog =
        FormatterCatalog::builtin(Arc::new(FrozenClock::leap_day())).expect("built-ins compile");
    MessagingFactory::new(configuration, catalog, Arc::new(connector))
}

/// Publishes everything the producer side of `id` has sent to the
/// consumer side of the same configuration, returning how many payloads
/// were relayed.
///
/// # Errors
///
/// Returns a transport error when either side's state is unreadable.
///
/// # Panics
///
/// Panics when either endpoint has not been created yet.
pub fn relay(connector: &InMemoryConnector, id: TransportConfigId) -> TransportResult<usize> {
    let producer = connector.producer_for(id).expect("producer was created");
    let consumer = connector.consumer_for(id).expect("consumer was created");
    let payloads = producer.sent_payloads()?;
    let count = payloads.len();
    for payload in payloads {
        consumer.publish_payload(payload)?;
    }
    Ok(count)
}

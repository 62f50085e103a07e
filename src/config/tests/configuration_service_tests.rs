//! Tests for persisted configuration edits.

use crate::config::{
    domain::{AppConfiguration, ConfigError, TransportConfig},
    services::ConfigurationService,
};
use crate::history::adapters::InMemoryDocumentStore;
use rstest::{fixture, rstest};
use std::sync::Arc;

type Store = InMemoryDocumentStore<AppConfiguration>;

struct Harness {
    store: Arc<Store>,
    service: ConfigurationService<Store>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(Store::new());
    Harness {
        service: ConfigurationService::new(Arc::clone(&store)),
        store,
    }
}

fn orders() -> TransportConfig {
    TransportConfig::new("Orders", "Endpoint=sb://orders/", "orders").expect("valid config")
}

#[rstest]
#[tokio::test]
async fn load_without_document_is_empty(harness: Harness) {
    let configuration = harness.service.load().await.expect("load succeeds");
    assert!(configuration.transports().is_empty());
}

#[rstest]
#[tokio::test]
async fn save_transport_persists(harness: Harness) {
    let config = orders();
    harness
        .service
        .save_transport(config.clone())
        .await
        .expect("save succeeds");

    let loaded = harness.service.load().await.expect("load succeeds");
    assert_eq!(loaded.find(config.id()), Some(&config));
    assert_eq!(harness.store.saves().expect("count readable"), 1);
}

#[rstest]
#[tokio::test]
async fn remove_absent_transport_does_not_write(harness: Harness) {
    let removed = harness
        .service
        .remove_transport(orders().id())
        .await
        .expect("remove succeeds");

    assert!(removed.is_none());
    assert_eq!(harness.store.saves().expect("count readable"), 0);
}

#[rstest]
#[tokio::test]
async fn remove_transport_persists(harness: Harness) {
    let config = orders();
    harness
        .service
        .save_transport(config.clone())
        .await
        .expect("save succeeds");

    let removed = harness
        .service
        .remove_transport(config.id())
        .await
        .expect("remove succeeds");

    assert_eq!(removed, Some(config));
    let loaded = harness.service.load().await.expect("load succeeds");
    assert!(loaded.transports().is_empty());
    assert_eq!(harness.store.saves().expect("count readable"), 2);
}

#[rstest]
#[tokio::test]
async fn invalid_stored_document_is_reported() {
    let json = r#"{"transports":[{"title":"","connectionString":"x","name":"y"}]}"#;
    let document: AppConfiguration = serde_json::from_str(json).expect("document parses");
    let service = ConfigurationService::new(Arc::new(Store::with_document(document)));

    assert!(matches!(
        service.load().await,
        Err(ConfigError::EmptyField("title"))
    ));
}

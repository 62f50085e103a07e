//! Tests for the provided delayed-send loop.

use crate::transport::{
    adapters::memory::{InMemoryProducerTransport, SendCall},
    domain::Payload,
    ports::{DelayedDelivery, ProducerTransport, TransportError},
};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

const DELAY: Duration = Duration::from_millis(100);

#[tokio::test(start_paused = true)]
async fn sends_sequentially_with_delay_between() {
    let transport = InMemoryProducerTransport::new();
    let started = Instant::now();

    let delivery = transport
        .send_with_delay(vec![Payload::from("m"); 3], DELAY, &CancellationToken::new())
        .await
        .expect("delayed send succeeds");

    assert_eq!(
        delivery,
        DelayedDelivery {
            delivered: 3,
            total: 3,
            cancelled: false,
        }
    );
    assert!(started.elapsed() >= DELAY * 2);
    let calls = transport.calls().expect("state readable");
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|call| matches!(call, SendCall::One(_))));
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_the_loop_early() {
    let transport = InMemoryProducerTransport::new();
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(DELAY + DELAY / 2).await;
        canceller.cancel();
    });

    let delivery = transport
        .send_with_delay(vec![Payload::from("m"); 5], DELAY, &token)
        .await
        .expect("cancellation is not an error");

    assert!(delivery.cancelled);
    assert_eq!(delivery.delivered, 2);
    assert_eq!(transport.calls().expect("state readable").len(), 2);
}

#[tokio::test(start_paused = true)]
async fn pre_cancelled_token_sends_nothing() {
    let transport = InMemoryProducerTransport::new();
    let token = CancellationToken::new();
    token.cancel();

    let delivery = transport
        .send_with_delay(vec![Payload::from("m"); 2], DELAY, &token)
        .await
        .expect("cancellation is not an error");

    assert_eq!(delivery.delivered, 0);
    assert!(delivery.cancelled);
}

#[tokio::test(start_paused = true)]
async fn non_cancellation_errors_propagate() {
    let transport = InMemoryProducerTransport::new();
    transport.dispose().await.expect("dispose succeeds");

    let result = transport
        .send_with_delay(vec![Payload::from("m"); 2], DELAY, &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(TransportError::Disposed)));
}

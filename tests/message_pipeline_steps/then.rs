//! Then steps for message pipeline BDD scenarios.

use super::world::MessageWorld;
use courier::producer::domain::{ProducerError, SendOutcome};
use courier::transport::{domain::Payload, ports::TransportError};
use rstest_bdd_macros::then;

#[then(r#"{count:usize} messages are received reading "{text}""#)]
fn messages_received_reading(
    world: &mut MessageWorld,
    count: usize,
    text: String,
) -> Result<(), eyre::Report> {
    for position in 0..count {
        let message = world.next_message()?;
        let received = message.payload().as_text();
        if received != Some(text.as_str()) {
            return Err(eyre::eyre!(
                "message {position}: expected '{text}', got {received:?}"
            ));
        }
    }
    Ok(())
}

#[then(r#"{count:usize} binary messages are received decoding to "{text}""#)]
fn binary_messages_received(
    world: &mut MessageWorld,
    count: usize,
    text: String,
) -> Result<(), eyre::Report> {
    for _ in 0..count {
        let message = world.next_message()?;
        if !matches!(message.payload(), Payload::Binary(_)) {
            return Err(eyre::eyre!("expected a binary payload, got {message:?}"));
        }
        let producer = world
            .producer
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no producer in scenario world"))?;
        let decoded = producer
            .encoding()
            .decode(message.payload())
            .map_err(|err| eyre::eyre!("decode failed: {err}"))?;
        if decoded != text {
            return Err(eyre::eyre!("expected '{text}', decoded '{decoded}'"));
        }
    }
    Ok(())
}

#[then("the send fails because the batch is too large")]
fn send_fails_batch_too_large(world: &MessageWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_send
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing send result in scenario world"))?;
    if !matches!(
        result,
        Err(ProducerError::Transport(
            TransportError::BatchCapacityExceeded { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected batch capacity error, got {result:?}"));
    }
    Ok(())
}

#[then("the send reports cancellation after {delivered:usize} deliveries")]
fn send_reports_cancellation(world: &MessageWorld, delivered: usize) -> Result<(), eyre::Report> {
    let result = world
        .last_send
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing send result in scenario world"))?;
    match result {
        Ok(outcome @ SendOutcome::Cancelled { .. }) if outcome.delivered() == delivered => Ok(()),
        other => Err(eyre::eyre!(
            "expected cancellation after {delivered} deliveries, got {other:?}"
        )),
    }
}

#[then(r#"nothing was sent through "{name}""#)]
fn nothing_was_sent(world: &MessageWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.id_of(&name)?;
    let sent = world
        .connector
        .producer_for(id)
        .ok_or_else(|| eyre::eyre!("no producer transport for '{name}'"))?
        .sent_payloads()
        .map_err(|err| eyre::eyre!("sent payloads unreadable: {err}"))?;
    if !sent.is_empty() {
        return Err(eyre::eyre!("expected nothing sent, found {}", sent.len()));
    }
    Ok(())
}

//! When steps for message pipeline BDD scenarios.

use super::world::{MessageWorld, run_async};
use crate::test_helpers::relay;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn send(
    world: &mut MessageWorld,
    name: &str,
    text: &str,
    count: usize,
    delay: Option<Duration>,
    cancellation: &CancellationToken,
) -> Result<(), eyre::Report> {
    let id = world.id_of(name)?;
    let producer = world
        .factory()
        .create_producer(id)
        .wrap_err("build producer")?;
    world.last_send = Some(run_async(
        producer.send_messages(text, count, delay, cancellation),
    ));
    world.producer = Some(producer);
    Ok(())
}

#[when(r#""{text}" is sent {count:usize} times through "{name}""#)]
fn text_is_sent(
    world: &mut MessageWorld,
    text: String,
    count: usize,
    name: String,
) -> Result<(), eyre::Report> {
    send(world, &name, &text, count, None, &CancellationToken::new())
}

#[when(
    r#""{text}" is sent {count:usize} times with a {delay:u64} ms delay through "{name}" using a cancelled token"#
)]
fn text_is_sent_cancelled(
    world: &mut MessageWorld,
    text: String,
    count: usize,
    delay: u64,
    name: String,
) -> Result<(), eyre::Report> {
    let cancellation = CancellationToken::new();
    cancellation.cancel();
    send(
        world,
        &name,
        &text,
        count,
        Some(Duration::from_millis(delay)),
        &cancellation,
    )
}

#[when(r#"the sent messages are relayed to "{name}""#)]
fn messages_are_relayed(world: &mut MessageWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.id_of(&name)?;
    relay(&world.connector, id).wrap_err("relay sent payloads")?;
    Ok(())
}

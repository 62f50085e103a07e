//! Given steps for message pipeline BDD scenarios.

use super::world::{MessageWorld, run_async};
use courier::config::{adapters::InMemoryConnector, domain::TransportConfig};
use courier::transport::adapters::memory::TransportLimits;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tokio_util::sync::CancellationToken;

fn transport_named(name: &str) -> Result<TransportConfig, eyre::Report> {
    TransportConfig::new(name, format!("Endpoint=sb://{name}/"), name)
        .wrap_err("build transport configuration")
}

#[given(r#"a transport "{name}" with the "{formatter}" formatter enabled"#)]
fn transport_with_formatter(
    world: &mut MessageWorld,
    name: String,
    formatter: String,
) -> Result<(), eyre::Report> {
    let config = transport_named(&name)?.with_formatter(formatter, true);
    world.register(name, config);
    Ok(())
}

#[given(r#"a compressed transport "{name}""#)]
fn compressed_transport(world: &mut MessageWorld, name: String) -> Result<(), eyre::Report> {
    let config = transport_named(&name)?.with_encoding(true, false);
    world.register(name, config);
    Ok(())
}

#[given(r#"a transport "{name}" limited to {limit:usize} bytes per batch"#)]
fn transport_with_batch_limit(
    world: &mut MessageWorld,
    name: String,
    limit: usize,
) -> Result<(), eyre::Report> {
    world.connector = InMemoryConnector::with_limits(TransportLimits {
        max_message_bytes: None,
        max_batch_bytes: Some(limit),
    });
    let config = transport_named(&name)?;
    world.register(name, config);
    Ok(())
}

#[given(r#"the consumer for "{name}" is receiving"#)]
fn consumer_is_receiving(world: &mut MessageWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.id_of(&name)?;
    let consumer = world
        .factory()
        .create_consumer(id)
        .wrap_err("build consumer bridge")?;
    let stream = run_async(consumer.start_receiving(&CancellationToken::new()))
        .wrap_err("start receiving")?;
    world.consumer = Some(consumer);
    world.stream = Some(stream);
    Ok(())
}

//! Transport configuration and producer/consumer construction.
//!
//! A [`domain::TransportConfig`] describes one configured transport. The
//! [`services::MessagingFactory`] turns a configuration id into a ready
//! [`crate::producer::services::MessageProducer`] or
//! [`crate::consumer::services::MessageConsumerBridge`], wiring in the
//! formatters the configuration enables and the matching encoding
//! strategy. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The transport connector contract in [`ports`]
//! - The in-memory connector in [`adapters`]
//! - Factory and configuration persistence in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

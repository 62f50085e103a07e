//! Outgoing message production.
//!
//! A [`services::MessageProducer`] composes three steps for every send:
//! the before-send formatter pipeline, an encoding strategy that turns text
//! into a transport payload, and a dispatch mode (single, batch, or delayed
//! with cancellation). The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The encoding capability in [`ports`]
//! - Codec helpers and encoding strategies in [`adapters`]
//! - The producer itself in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

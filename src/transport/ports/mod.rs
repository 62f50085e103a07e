//! Port contracts for transport providers.
//!
//! Ports define infrastructure-agnostic interfaces used by producers and
//! the consumer bridge.

pub mod consumer;
pub mod error;
pub mod producer;

pub use consumer::{ConsumerTransport, MessageHandler};
pub use error::{TransportError, TransportResult};
pub use producer::{DelayedDelivery, ProducerTransport};

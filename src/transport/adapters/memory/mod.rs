//! In-memory transports.
//!
//! These stand in for a real event-streaming client in tests and local
//! runs: the producer side records every send call and the consumer side is
//! fed explicitly through [`InMemoryConsumerTransport::publish`].

mod consumer;
mod producer;

pub use consumer::InMemoryConsumerTransport;
pub use producer::{InMemoryProducerTransport, SendCall, TransportLimits};

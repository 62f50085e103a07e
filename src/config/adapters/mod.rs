//! Adapter implementations of the connector port.

pub mod memory;

pub use memory::InMemoryConnector;

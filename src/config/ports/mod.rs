//! Port contracts for transport construction.

pub mod connector;

pub use connector::TransportConnector;

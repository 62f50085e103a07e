//! Courier: configurable message-transport test harness.
//!
//! This crate sends and receives text or byte payloads through a pluggable
//! transport, applying a chain of text transformations before send and after
//! receive, with batching, delayed delivery, and a bounded rolling history of
//! recent activity.
//!
//! # Architecture
//!
//! Courier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for transports and stores
//! - **Adapters**: Concrete implementations of ports (in-memory, JSON files)
//! - **Services**: Orchestration of domain types over ports
//!
//! # Modules
//!
//! - [`formatting`]: Ordered, fault-isolating text formatter pipeline
//! - [`transport`]: Transport provider contracts and in-memory adapters
//! - [`producer`]: Payload encoding and single, batch, or delayed dispatch
//! - [`consumer`]: Callback-to-stream bridge for received messages
//! - [`history`]: Circular buffer, receive log, and sent-message history
//! - [`config`]: Transport configuration and producer/consumer factory
//! - [`cancellation`]: Resettable cancellation scope
//! - [`telemetry`]: Logging configuration

pub mod cancellation;
pub mod config;
pub mod consumer;
pub mod formatting;
pub mod history;
pub mod producer;
pub mod telemetry;
pub mod transport;

#[cfg(test)]
mod test_support;

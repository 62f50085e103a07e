//! Rolling and persisted message history.
//!
//! The module follows hexagonal architecture:
//!
//! - [`domain::CircularBuffer`] and the sent-message history document in
//!   [`domain`]
//! - The document store contract in [`ports`]
//! - In-memory and JSON file stores in [`adapters`]
//! - The receive log and sent-message history service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

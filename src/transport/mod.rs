//! Transport provider contracts and in-memory adapters.
//!
//! The concrete wire transport lives outside this crate. Producers and the
//! consumer bridge talk to it only through the ports defined here:
//!
//! - Payload and received-message types in [`domain`]
//! - Send-side and receive-side contracts in [`ports`]
//! - In-memory transports for tests and local runs in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;

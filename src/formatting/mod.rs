//! Text formatting applied to payloads before send and after receive.
//!
//! Formatters are independent, order-sensitive text transformations. A
//! [`services::FormatterPipeline`] threads text through an ordered list of
//! formatters and isolates failures: a formatter that errors (or panics)
//! is skipped and the text it received flows on to the next one. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Built-in formatters in [`adapters`]
//! - Pipeline and catalog in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Port contracts for message production.

pub mod encoding;

pub use encoding::EncodingStrategy;

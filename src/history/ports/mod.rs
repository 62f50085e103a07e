//! Port contracts for persisted documents.

pub mod store;

pub use store::{DocumentStore, StoreError, StoreResult};

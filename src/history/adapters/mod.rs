//! Adapter implementations of the document store port.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryDocumentStore;

//! Port contracts for text formatting.

pub mod formatter;

pub use formatter::MessageFormatter;

//! Formatter orchestration services.

mod catalog;
mod pipeline;

pub use catalog::FormatterCatalog;
pub use pipeline::{FormatterPipeline, ProcessReport};

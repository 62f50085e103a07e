//! Domain types for message production.

mod error;
mod options;
mod outcome;

pub use error::{EncodingError, EncodingResult, ProducerError, ProducerResult};
pub use options::EncodingOptions;
pub use outcome::{DispatchMode, SendOutcome};

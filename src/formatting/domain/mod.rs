//! Domain model for text formatting.

mod error;
mod phase;

pub use error::{FormatterError, FormatterFailure, FormatterResult};
pub use phase::{FormatterPhase, FormatterToggles, ParseFormatterPhaseError};

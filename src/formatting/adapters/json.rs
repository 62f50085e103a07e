//! JSON pretty-printing formatter.

use crate::formatting::{
    domain::{FormatterError, FormatterPhase, FormatterResult},
    ports::MessageFormatter,
};
use serde_json::Value;

/// Re-serialises valid JSON documents with stable two-space indentation.
///
/// Text that is not a strict JSON document is returned unchanged. Key order
/// is preserved and non-ASCII characters are written as-is rather than
/// escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonPrettyFormatter {
    phase: FormatterPhase,
}

impl JsonPrettyFormatter {
    /// Stable formatter name.
    pub const NAME: &'static str = "Json formatter";

    /// Creates a formatter for received payloads.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_phase(FormatterPhase::AfterReceive)
    }

    /// Creates a formatter bound to the given phase.
    #[must_use]
    pub const fn with_phase(phase: FormatterPhase) -> Self {
        Self { phase }
    }
}

impl Default for JsonPrettyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFormatter for JsonPrettyFormatter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn phase(&self) -> FormatterPhase {
        self.phase
    }

    fn transform(&self, input: &str) -> FormatterResult<String> {
        if input.trim().is_empty() {
            return Ok(input.to_owned());
        }
        let Ok(document) = serde_json::from_str::<Value>(input) else {
            return Ok(input.to_owned());
        };
        serde_json::to_string_pretty(&document)
            .map_err(|err| FormatterError::transform(Self::NAME, err))
    }
}

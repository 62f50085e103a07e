//! GUID replacement formatter.

use crate::formatting::{
    domain::{FormatterError, FormatterPhase, FormatterResult},
    ports::MessageFormatter,
};
use regex::{Captures, Regex};
use uuid::Uuid;

// 8-4-4-4-12 hex digits, hyphens optional.
const GUID_PATTERN: &str =
    r"\b[A-Fa-f0-9]{8}-?[A-Fa-f0-9]{4}-?[A-Fa-f0-9]{4}-?[A-Fa-f0-9]{4}-?[A-Fa-f0-9]{12}\b";

/// Replaces every GUID-shaped token with a freshly generated UUID.
///
/// Each match receives an independent value, so repeated runs over the
/// same input produce different output.
#[derive(Debug, Clone)]
pub struct GuidReplacer {
    pattern: Regex,
}

impl GuidReplacer {
    /// Stable formatter name.
    pub const NAME: &'static str = "Guid replacer";

    /// Compiles the GUID pattern.
    ///
    /// # Errors
    ///
    /// Returns [`FormatterError::InvalidPattern`] when the pattern fails to
    /// compile.
    pub fn new() -> FormatterResult<Self> {
        let pattern = Regex::new(GUID_PATTERN)
            .map_err(|err| FormatterError::invalid_pattern(Self::NAME, err))?;
        Ok(Self { pattern })
    }
}

impl MessageFormatter for GuidReplacer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn phase(&self) -> FormatterPhase {
        FormatterPhase::BeforeSend
    }

    fn transform(&self, input: &str) -> FormatterResult<String> {
        let replaced = self
            .pattern
            .replace_all(input, |_: &Captures<'_>| Uuid::new_v4().to_string());
        Ok(replaced.into_owned())
    }
}

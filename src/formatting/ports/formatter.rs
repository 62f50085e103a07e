//! Formatter capability.

use crate::formatting::domain::{FormatterPhase, FormatterResult};

/// A single named text transformation.
///
/// Formatters are created once, shared between pipelines, and called
/// concurrently, so implementations must not mutate shared state while
/// transforming.
pub trait MessageFormatter: Send + Sync {
    /// Returns the stable formatter name used in configuration toggles.
    fn name(&self) -> &str;

    /// Returns the phase this formatter belongs to.
    fn phase(&self) -> FormatterPhase;

    /// Transforms `input` into its formatted form.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::formatting::domain::FormatterError`] when the
    /// transformation cannot be applied.
    fn transform(&self, input: &str) -> FormatterResult<String>;
}

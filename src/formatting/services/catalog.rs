//! Registry of available formatters.

use crate::formatting::{
    adapters::{DateReplacer, DateTimeReplacer, GuidReplacer, JsonPrettyFormatter},
    domain::{FormatterPhase, FormatterResult, FormatterToggles},
    ports::MessageFormatter,
    services::FormatterPipeline,
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;

/// Every formatter available to configurations, each registered once.
///
/// Pipelines built from the catalog share its formatter instances.
#[derive(Clone, Default)]
pub struct FormatterCatalog {
    formatters: Vec<Arc<dyn MessageFormatter>>,
}

impl FormatterCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in formatters.
    ///
    /// Registration order is JSON, GUID, date, then date-time.
    ///
    /// # Errors
    ///
    /// Returns a formatter error when a built-in pattern fails to compile.
    pub fn builtin<C>(clock: Arc<C>) -> FormatterResult<Self>
    where
        C: Clock + Send + Sync + 'static,
    {
        let mut catalog = Self::empty();
        catalog
            .register(Arc::new(JsonPrettyFormatter::new()))
            .register(Arc::new(GuidReplacer::new()?))
            .register(Arc::new(DateReplacer::new(Arc::clone(&clock))?))
            .register(Arc::new(DateTimeReplacer::new(clock)?));
        Ok(catalog)
    }

    /// Adds a formatter to the catalog.
    pub fn register(&mut self, formatter: Arc<dyn MessageFormatter>) -> &mut Self {
        self.formatters.push(formatter);
        self
    }

    /// Returns registered formatter names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }

    /// Finds a formatter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn MessageFormatter>> {
        self.formatters.iter().find(|f| f.name() == name).cloned()
    }

    /// Returns the formatters of `phase` that `toggles` enables.
    ///
    /// Names missing from `toggles` count as disabled. The result keeps
    /// catalog registration order.
    #[must_use]
    pub fn select(
        &self,
        phase: FormatterPhase,
        toggles: &FormatterToggles,
    ) -> Vec<Arc<dyn MessageFormatter>> {
        self.formatters
            .iter()
            .filter(|f| f.phase() == phase)
            .filter(|f| toggles.get(f.name()).copied().unwrap_or(false))
            .cloned()
            .collect()
    }

    /// Builds a pipeline from [`Self::select`].
    #[must_use]
    pub fn pipeline_for(
        &self,
        phase: FormatterPhase,
        toggles: &FormatterToggles,
    ) -> FormatterPipeline {
        FormatterPipeline::with_formatters(self.select(phase, toggles))
    }
}

impl fmt::Debug for FormatterCatalog {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FormatterCatalog")
            .field("formatters", &self.names())
            .finish()
    }
}

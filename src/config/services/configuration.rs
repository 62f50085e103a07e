//! Persisted application configuration.

use crate::config::domain::{AppConfiguration, ConfigResult, TransportConfig, TransportConfigId};
use crate::history::ports::DocumentStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Loads and edits the application configuration through a document store.
#[derive(Debug)]
pub struct ConfigurationService<S> {
    store: Arc<S>,
    update: Mutex<()>,
}

impl<S> ConfigurationService<S>
where
    S: DocumentStore<AppConfiguration>,
{
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            update: Mutex::new(()),
        }
    }

    /// Loads the configuration; empty when nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns [`crate::config::domain::ConfigError::Store`] when loading
    /// fails, or a validation error for an invalid stored transport.
    pub async fn load(&self) -> ConfigResult<AppConfiguration> {
        let configuration = self.store.load().await?.unwrap_or_default();
        configuration.validate()?;
        Ok(configuration)
    }

    /// Inserts or replaces a transport configuration and saves.
    ///
    /// # Errors
    ///
    /// Returns a validation error for `config`, or a store error.
    pub async fn save_transport(&self, config: TransportConfig) -> ConfigResult<()> {
        let _guard = self.update.lock().await;
        let mut configuration = self.load().await?;
        configuration.upsert(config)?;
        self.store.save(&configuration).await?;
        Ok(())
    }

    /// Removes a transport configuration and saves, returning it when it
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub async fn remove_transport(
        &self,
        id: TransportConfigId,
    ) -> ConfigResult<Option<TransportConfig>> {
        let _guard = self.update.lock().await;
        let mut configuration = self.load().await?;
        let removed = configuration.remove(id);
        if removed.is_some() {
            self.store.save(&configuration).await?;
        }
        Ok(removed)
    }
}

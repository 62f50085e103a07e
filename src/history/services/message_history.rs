//! Sent-message history over a document store.

use crate::config::domain::TransportConfigId;
use crate::history::{
    domain::MessagesHistory,
    ports::{DocumentStore, StoreResult},
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Records which texts were sent through each transport configuration.
///
/// Updates are read-modify-write cycles over the whole document and are
/// serialised per service instance.
#[derive(Debug)]
pub struct MessageHistoryService<S> {
    store: Arc<S>,
    update: Mutex<()>,
}

impl<S> MessageHistoryService<S>
where
    S: DocumentStore<MessagesHistory>,
{
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            update: Mutex::new(()),
        }
    }

    async fn load(&self) -> StoreResult<MessagesHistory> {
        Ok(self.store.load().await?.unwrap_or_default())
    }

    /// Returns the texts sent through `config_id`; empty when none.
    ///
    /// # Errors
    ///
    /// Returns a store error when the document cannot be loaded.
    pub async fn history(&self, config_id: TransportConfigId) -> StoreResult<BTreeSet<String>> {
        Ok(self
            .load()
            .await?
            .messages(config_id)
            .cloned()
            .unwrap_or_default())
    }

    /// Records `text` for `config_id`.
    ///
    /// Returns `false` without writing when the text is already recorded.
    ///
    /// # Errors
    ///
    /// Returns a store error when the document cannot be loaded or saved.
    pub async fn add_message(
        &self,
        config_id: TransportConfigId,
        text: &str,
    ) -> StoreResult<bool> {
        let _guard = self.update.lock().await;
        let mut history = self.load().await?;
        if !history.insert(config_id, text) {
            return Ok(false);
        }
        self.store.save(&history).await?;
        debug!(%config_id, "message added to history");
        Ok(true)
    }

    /// Forgets `text` for `config_id`.
    ///
    /// Returns `false` without writing when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns a store error when the document cannot be loaded or saved.
    pub async fn remove_message(
        &self,
        config_id: TransportConfigId,
        text: &str,
    ) -> StoreResult<bool> {
        let _guard = self.update.lock().await;
        let Some(mut history) = self.store.load().await? else {
            return Ok(false);
        };
        if !history.remove(config_id, text) {
            return Ok(false);
        }
        self.store.save(&history).await?;
        debug!(%config_id, "message removed from history");
        Ok(true)
    }
}

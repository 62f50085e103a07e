//! In-memory document store for tests.

use crate::history::ports::{DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

#[derive(Debug)]
struct StoreState<T> {
    document: Option<T>,
    saves: usize,
}

/// Thread-safe in-memory document store.
///
/// Clones share the same document.
#[derive(Debug)]
pub struct InMemoryDocumentStore<T> {
    state: Arc<RwLock<StoreState<T>>>,
}

impl<T> Clone for InMemoryDocumentStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for InMemoryDocumentStore<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                document: None,
                saves: 0,
            })),
        }
    }
}

impl<T> InMemoryDocumentStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `document`.
    #[must_use]
    pub fn with_document(document: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                document: Some(document),
                saves: 0,
            })),
        }
    }

    /// Returns how many times [`DocumentStore::save`] succeeded.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn saves(&self) -> StoreResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.saves)
    }
}

#[async_trait]
impl<T> DocumentStore<T> for InMemoryDocumentStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> StoreResult<Option<T>> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.document.clone())
    }

    async fn save(&self, document: &T) -> StoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        state.document = Some(document.clone());
        state.saves += 1;
        Ok(())
    }
}

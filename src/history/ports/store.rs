//! Single-document persistence contract.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Loads and saves one whole document of type `T`.
#[async_trait]
pub trait DocumentStore<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Loads the stored document.
    ///
    /// Returns `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disposed`] after the store was closed, or an
    /// I/O or serialisation error.
    async fn load(&self) -> StoreResult<Option<T>>;

    /// Replaces the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disposed`] after the store was closed, or an
    /// I/O or serialisation error.
    async fn save(&self, document: &T) -> StoreResult<()>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store was closed.
    #[error("document store has already been disposed")]
    Disposed,

    /// Reading or writing the backing file failed.
    #[error("document store I/O error: {0}")]
    Io(Arc<std::io::Error>),

    /// The document could not be encoded or decoded.
    #[error("document serialisation error: {0}")]
    Serialization(Arc<serde_json::Error>),

    /// Any other persistence failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }

    /// Wraps a serialisation error.
    #[must_use]
    pub fn serialization(err: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Errors raised by transport providers.

use std::sync::Arc;
use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors returned by transport provider implementations.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// A single payload exceeds the transport's message size limit.
    #[error("message of {size} bytes exceeds the {limit} byte limit")]
    MessageTooLarge {
        /// Payload size in bytes.
        size: usize,
        /// Maximum accepted size in bytes.
        limit: usize,
    },

    /// A batch could not hold every payload of a single send call.
    #[error("batch capacity of {limit} bytes exceeded after {accepted} of {requested} messages")]
    BatchCapacityExceeded {
        /// Number of payloads that fitted before the overflow.
        accepted: usize,
        /// Number of payloads in the send call.
        requested: usize,
        /// Batch size limit in bytes.
        limit: usize,
    },

    /// The operation was cancelled before it completed.
    #[error("transport operation was cancelled")]
    Cancelled,

    /// The transport handle was already released.
    #[error("transport has already been disposed")]
    Disposed,

    /// The receive side could not be started.
    #[error("failed to start receiving: {0}")]
    StartFailed(String),

    /// Provider-specific failure.
    #[error("transport provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps a provider error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }

    /// Returns whether this error reports a cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

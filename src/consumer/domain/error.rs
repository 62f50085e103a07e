//! Error types for the consumer bridge.

use crate::cancellation::ScopeError;
use crate::transport::ports::TransportError;
use thiserror::Error;

/// Result type for consumer bridge operations.
pub type ConsumerResult<T> = Result<T, ConsumerError>;

/// Errors returned by [`crate::consumer::services::MessageConsumerBridge`].
#[derive(Debug, Clone, Error)]
pub enum ConsumerError {
    /// The transport refused to start delivering messages.
    #[error("receive session did not start: {0}")]
    StartFailed(#[source] TransportError),

    /// The transport failed while stopping.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The bridge was disposed.
    #[error("consumer has already been disposed")]
    Disposed,
}

impl From<ScopeError> for ConsumerError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::Disposed => Self::Disposed,
        }
    }
}

//! Error types for encoding and dispatch.

use crate::cancellation::ScopeError;
use crate::transport::ports::TransportError;
use std::sync::Arc;
use thiserror::Error;

/// Result type for encoding operations.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Result type for producer operations.
pub type ProducerResult<T> = Result<T, ProducerError>;

/// Errors raised while encoding or decoding payloads.
#[derive(Debug, Clone, Error)]
pub enum EncodingError {
    /// The strategy cannot work with the configured options.
    #[error("encoding misconfigured: {0}")]
    Misconfigured(String),

    /// The payload kind does not match what the strategy produces.
    #[error("expected a {expected} payload")]
    UnexpectedPayload {
        /// Payload kind the strategy expects.
        expected: &'static str,
    },

    /// Gzip compression or decompression failed.
    #[error("gzip error: {0}")]
    Compression(Arc<std::io::Error>),

    /// Base64 text could not be decoded.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes were not valid UTF-8.
    #[error("decoded payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl EncodingError {
    /// Wraps a gzip I/O error.
    #[must_use]
    pub fn compression(err: std::io::Error) -> Self {
        Self::Compression(Arc::new(err))
    }
}

/// Errors returned by [`crate::producer::services::MessageProducer`].
#[derive(Debug, Clone, Error)]
pub enum ProducerError {
    /// The formatted text could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The transport rejected the send.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The producer was disposed.
    #[error("producer has already been disposed")]
    Disposed,
}

impl From<ScopeError> for ProducerError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::Disposed => Self::Disposed,
        }
    }
}

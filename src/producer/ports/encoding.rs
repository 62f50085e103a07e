//! Payload encoding capability.

use crate::producer::domain::{EncodingOptions, EncodingResult};
use crate::transport::domain::Payload;
use std::fmt;

/// Turns formatted text into a transport payload and back.
pub trait EncodingStrategy: fmt::Debug + Send + Sync {
    /// Returns the options this strategy was built from.
    fn options(&self) -> EncodingOptions;

    /// Encodes formatted text for the transport.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::producer::domain::EncodingError`] when the text
    /// cannot be encoded under the configured options.
    fn encode(&self, text: &str) -> EncodingResult<Payload>;

    /// Reverses [`Self::encode`].
    ///
    /// # Errors
    ///
    /// Returns an [`crate::producer::domain::EncodingError`] when the payload
    /// was not produced by this strategy.
    fn decode(&self, payload: &Payload) -> EncodingResult<String>;
}

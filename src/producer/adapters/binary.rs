//! Raw gzip payload strategy.

use super::codec::{gzip_compress, gzip_decompress};
use crate::producer::{
    domain::{EncodingError, EncodingOptions, EncodingResult},
    ports::EncodingStrategy,
};
use crate::transport::domain::Payload;

/// Ships gzip-compressed bytes.
///
/// The strategy only makes sense with compression enabled; encoding under
/// any other options is a configuration error surfaced at send time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryGzipEncoding {
    options: EncodingOptions,
}

impl BinaryGzipEncoding {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(options: EncodingOptions) -> Self {
        Self { options }
    }

    fn ensure_compressed(self) -> EncodingResult<()> {
        if self.options.use_compression {
            Ok(())
        } else {
            Err(EncodingError::Misconfigured(
                "binary payloads require gzip compression".to_owned(),
            ))
        }
    }
}

impl EncodingStrategy for BinaryGzipEncoding {
    fn options(&self) -> EncodingOptions {
        self.options
    }

    fn encode(&self, text: &str) -> EncodingResult<Payload> {
        self.ensure_compressed()?;
        Ok(Payload::Binary(gzip_compress(text)?))
    }

    fn decode(&self, payload: &Payload) -> EncodingResult<String> {
        self.ensure_compressed()?;
        match payload {
            Payload::Binary(bytes) => gzip_decompress(bytes),
            Payload::Text(_) => Err(EncodingError::UnexpectedPayload { expected: "binary" }),
        }
    }
}

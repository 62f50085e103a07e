//! Text payload strategy.

use super::codec::{base64_decode, base64_encode, gzip_compress, gzip_decompress};
use crate::producer::{
    domain::{EncodingOptions, EncodingResult},
    ports::EncodingStrategy,
};
use crate::transport::domain::Payload;

/// Ships text payloads.
///
/// With compression enabled the text is gzip-compressed and then
/// base64-encoded; otherwise it is sent as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringEncoding {
    options: EncodingOptions,
}

impl StringEncoding {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(options: EncodingOptions) -> Self {
        Self { options }
    }
}

impl EncodingStrategy for StringEncoding {
    fn options(&self) -> EncodingOptions {
        self.options
    }

    fn encode(&self, text: &str) -> EncodingResult<Payload> {
        if !self.options.use_compression {
            return Ok(Payload::Text(text.to_owned()));
        }
        let compressed = gzip_compress(text)?;
        Ok(Payload::Text(base64_encode(&compressed)))
    }

    fn decode(&self, payload: &Payload) -> EncodingResult<String> {
        match payload {
            Payload::Text(text) if self.options.use_compression => {
                gzip_decompress(&base64_decode(text)?)
            }
            Payload::Text(text) => Ok(text.clone()),
            Payload::Binary(bytes) if self.options.use_compression => gzip_decompress(bytes),
            Payload::Binary(bytes) => Ok(String::from_utf8(bytes.clone())?),
        }
    }
}

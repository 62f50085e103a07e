//! Gzip and base64 helpers.

use crate::producer::domain::{EncodingError, EncodingResult};
use base64::{Engine as _, engine::general_purpose};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};

/// Gzip-compresses the UTF-8 bytes of `text`.
///
/// Empty text compresses to an empty buffer rather than a gzip header.
///
/// # Errors
///
/// Returns [`EncodingError::Compression`] when the encoder fails.
pub fn gzip_compress(text: &str) -> EncodingResult<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .map_err(EncodingError::compression)?;
    encoder.finish().map_err(EncodingError::compression)
}

/// Decompresses gzip bytes into text.
///
/// An empty buffer decompresses to empty text.
///
/// # Errors
///
/// Returns [`EncodingError::Compression`] for corrupt input or
/// [`EncodingError::Utf8`] when the decompressed bytes are not UTF-8.
pub fn gzip_decompress(bytes: &[u8]) -> EncodingResult<String> {
    if bytes.is_empty() {
        return Ok(String::new());
    }
    let mut decoded = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut decoded)
        .map_err(EncodingError::compression)?;
    Ok(String::from_utf8(decoded)?)
}

/// Encodes bytes as standard padded base64.
#[must_use]
pub fn base64_encode(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decodes standard padded base64.
///
/// # Errors
///
/// Returns [`EncodingError::Base64`] for malformed input.
pub fn base64_decode(text: &str) -> EncodingResult<Vec<u8>> {
    Ok(general_purpose::STANDARD.decode(text)?)
}

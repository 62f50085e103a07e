//! Payload encoding options.

use serde::{Deserialize, Serialize};

/// Encoding switches fixed when a producer is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingOptions {
    /// Gzip-compress the formatted text.
    pub use_compression: bool,
    /// Ship compressed bytes as base64 text rather than raw bytes.
    pub use_base64: bool,
}

impl EncodingOptions {
    /// Creates encoding options.
    #[must_use]
    pub const fn new(use_compression: bool, use_base64: bool) -> Self {
        Self {
            use_compression,
            use_base64,
        }
    }

    /// Returns whether payloads travel as raw compressed bytes.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        self.use_compression && !self.use_base64
    }
}

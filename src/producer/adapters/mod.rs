//! Codec helpers and encoding strategies.

mod binary;
pub mod codec;
mod string;

pub use binary::BinaryGzipEncoding;
pub use string::StringEncoding;

use crate::producer::{domain::EncodingOptions, ports::EncodingStrategy};
use std::sync::Arc;

/// Selects the encoding strategy for `options`.
///
/// Compression without base64 ships raw gzip bytes; every other
/// combination ships text.
#[must_use]
pub fn strategy_for(options: EncodingOptions) -> Arc<dyn EncodingStrategy> {
    if options.is_binary() {
        Arc::new(BinaryGzipEncoding::new(options))
    } else {
        Arc::new(StringEncoding::new(options))
    }
}

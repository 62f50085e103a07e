//! Consumer bridge services.

mod bridge;
mod stream;

pub use bridge::MessageConsumerBridge;
pub use stream::MessageStream;

//! Domain types for the consumer bridge.

mod error;
mod state;

pub use error::{ConsumerError, ConsumerResult};
pub use state::ReceiveState;

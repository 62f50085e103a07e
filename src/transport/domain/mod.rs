//! Domain types exchanged with transport providers.

mod message;
mod payload;

pub use message::{PartitionId, ReceivedMessage};
pub use payload::Payload;

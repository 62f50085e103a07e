//! Domain types for message history.

mod circular_buffer;
mod messages_history;

pub use circular_buffer::{BufferError, BufferResult, CircularBuffer};
pub use messages_history::MessagesHistory;

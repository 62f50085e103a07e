//! History services.

mod message_history;
mod receive_log;

pub use message_history::MessageHistoryService;
pub use receive_log::ReceiveLog;

//! Rolling window of received messages.

use crate::history::domain::{BufferResult, CircularBuffer};
use crate::transport::domain::ReceivedMessage;

/// Keeps the most recent received messages with their absolute positions.
#[derive(Debug)]
pub struct ReceiveLog {
    buffer: CircularBuffer<ReceivedMessage>,
}

impl ReceiveLog {
    /// Creates a log retaining at most `capacity` messages.
    ///
    /// # Errors
    ///
    /// Returns [`crate::history::domain::BufferError::ZeroCapacity`] when
    /// `capacity` is zero.
    pub fn new(capacity: usize) -> BufferResult<Self> {
        Ok(Self {
            buffer: CircularBuffer::new(capacity)?,
        })
    }

    /// Appends a received message, evicting the oldest when full.
    pub fn record(&self, message: ReceivedMessage) {
        self.buffer.add(message);
    }

    /// Returns retained messages, oldest first, each with the position it
    /// holds among every message received since the last clear.
    #[must_use]
    pub fn entries(&self) -> Vec<(usize, ReceivedMessage)> {
        self.buffer.to_indexed_vec()
    }

    /// Returns the newest retained message.
    #[must_use]
    pub fn latest(&self) -> Option<ReceivedMessage> {
        self.buffer.try_last()
    }

    /// Returns the oldest retained message.
    #[must_use]
    pub fn oldest(&self) -> Option<ReceivedMessage> {
        self.buffer.try_first()
    }

    /// Returns how many messages were recorded since the last clear.
    #[must_use]
    pub fn total_received(&self) -> usize {
        self.buffer.total_added()
    }

    /// Returns how many messages are retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns whether no message is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the retention limit.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Forgets every message and resets the counter.
    pub fn clear(&self) {
        self.buffer.clear();
    }
}

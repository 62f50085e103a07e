//! Results of a send request.

use std::fmt;
use std::time::Duration;

/// How a send request was dispatched to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchMode {
    /// One payload in one transport call.
    Single,
    /// Identical payloads in one batch call.
    Batch,
    /// Identical payloads sent one at a time with a wait between them.
    Delayed,
}

impl DispatchMode {
    /// Chooses the dispatch mode for a request.
    ///
    /// At most one message is a single send. Several messages without a
    /// positive delay go out as one batch; otherwise they are delayed.
    #[must_use]
    pub fn for_request(number_of_messages: usize, delay: Option<Duration>) -> Self {
        match delay {
            _ if number_of_messages <= 1 => Self::Single,
            Some(delay) if !delay.is_zero() => Self::Delayed,
            _ => Self::Batch,
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Batch => "batch",
            Self::Delayed => "delayed",
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// What happened to a send request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The text was blank; nothing was sent.
    Skipped,
    /// Every requested message was handed to the transport.
    Sent {
        /// Dispatch mode used.
        mode: DispatchMode,
        /// Messages delivered.
        delivered: usize,
    },
    /// Cancellation stopped the request early.
    Cancelled {
        /// Dispatch mode used.
        mode: DispatchMode,
        /// Messages delivered before cancellation.
        delivered: usize,
    },
}

impl SendOutcome {
    /// Returns how many messages reached the transport.
    #[must_use]
    pub const fn delivered(self) -> usize {
        match self {
            Self::Skipped => 0,
            Self::Sent { delivered, .. } | Self::Cancelled { delivered, .. } => delivered,
        }
    }

    /// Returns whether cancellation cut the request short.
    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

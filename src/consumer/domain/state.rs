//! Receive session state machine.

use std::fmt;

/// Lifecycle of the bridge's single receive session.
///
/// `Idle -> Starting -> Streaming -> Stopped`, with `Stopped` (or `Idle`
/// after a failed start) able to start again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReceiveState {
    /// Never started, or the last start failed.
    #[default]
    Idle,
    /// A registration with the transport is in progress.
    Starting,
    /// The transport is delivering messages.
    Streaming,
    /// Receiving was stopped or the bridge was disposed.
    Stopped,
}

impl ReceiveState {
    /// Returns whether a receive session is starting or running.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Starting | Self::Streaming)
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Streaming => "streaming",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ReceiveState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

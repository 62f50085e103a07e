//! Received message envelope.

use super::Payload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport partition a message was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionId(String);

impl PartitionId {
    /// Creates a partition identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for PartitionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A message delivered by a transport.
///
/// Everything except the payload is fixed at creation; the consumer bridge
/// rewrites the payload in place when it applies receive-side formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedMessage {
    payload: Payload,
    partition_id: PartitionId,
    sequence_number: i64,
    enqueued_time: DateTime<Utc>,
}

impl ReceivedMessage {
    /// Creates a received message.
    #[must_use]
    pub const fn new(
        payload: Payload,
        partition_id: PartitionId,
        sequence_number: i64,
        enqueued_time: DateTime<Utc>,
    ) -> Self {
        Self {
            payload,
            partition_id,
            sequence_number,
            enqueued_time,
        }
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the payload for in-place rewriting.
    pub const fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Returns the partition the message was read from.
    #[must_use]
    pub const fn partition_id(&self) -> &PartitionId {
        &self.partition_id
    }

    /// Returns the transport-assigned sequence number.
    #[must_use]
    pub const fn sequence_number(&self) -> i64 {
        self.sequence_number
    }

    /// Returns when the transport enqueued the message.
    #[must_use]
    pub const fn enqueued_time(&self) -> DateTime<Utc> {
        self.enqueued_time
    }

    /// Consumes the message, returning its payload.
    #[must_use]
    pub fn into_payload(self) -> Payload {
        self.payload
    }
}

//! Formatter execution phase.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Marks whether a formatter runs on outgoing or incoming text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterPhase {
    /// Applied to text before it is encoded and sent.
    BeforeSend,
    /// Applied to received payload text before the caller observes it.
    AfterReceive,
}

impl FormatterPhase {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BeforeSend => "before_send",
            Self::AfterReceive => "after_receive",
        }
    }
}

impl fmt::Display for FormatterPhase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for FormatterPhase {
    type Error = ParseFormatterPhaseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "before_send" => Ok(Self::BeforeSend),
            "after_receive" => Ok(Self::AfterReceive),
            _ => Err(ParseFormatterPhaseError(value.to_owned())),
        }
    }
}

/// Error returned while parsing a formatter phase.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown formatter phase: {0}")]
pub struct ParseFormatterPhaseError(pub String);

/// Per-configuration switches keyed by formatter name.
pub type FormatterToggles = BTreeMap<String, bool>;

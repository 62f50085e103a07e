//! Sent-message history document.

use crate::config::domain::TransportConfigId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Previously sent message texts, grouped by transport configuration.
///
/// Serialises as a JSON object keyed by configuration id:
///
/// ```json
/// { "6f9619ff-8b86-d011-b42d-00c04fc964ff": ["hello", "{\"a\":1}"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessagesHistory {
    entries: BTreeMap<TransportConfigId, BTreeSet<String>>,
}

impl MessagesHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texts recorded for `config_id`.
    #[must_use]
    pub fn messages(&self, config_id: TransportConfigId) -> Option<&BTreeSet<String>> {
        self.entries.get(&config_id)
    }

    /// Returns whether `text` is recorded for `config_id`.
    #[must_use]
    pub fn contains(&self, config_id: TransportConfigId, text: &str) -> bool {
        self.entries
            .get(&config_id)
            .is_some_and(|messages| messages.contains(text))
    }

    /// Records `text` for `config_id`, returning whether it was new.
    pub fn insert(&mut self, config_id: TransportConfigId, text: impl Into<String>) -> bool {
        self.entries.entry(config_id).or_default().insert(text.into())
    }

    /// Removes `text` for `config_id`, returning whether it was present.
    ///
    /// A configuration left without messages is dropped from the document.
    pub fn remove(&mut self, config_id: TransportConfigId, text: &str) -> bool {
        let Some(messages) = self.entries.get_mut(&config_id) else {
            return false;
        };
        let removed = messages.remove(text);
        if messages.is_empty() {
            self.entries.remove(&config_id);
        }
        removed
    }

    /// Returns the configurations that have recorded messages.
    pub fn config_ids(&self) -> impl Iterator<Item = TransportConfigId> + '_ {
        self.entries.keys().copied()
    }

    /// Returns whether no message is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

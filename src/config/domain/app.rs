//! Application-wide configuration document.

use super::{ConfigResult, TransportConfig, TransportConfigId};
use serde::{Deserialize, Serialize};

/// Every configured transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfiguration {
    #[serde(default)]
    transports: Vec<TransportConfig>,
}

impl AppConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configured transports in insertion order.
    #[must_use]
    pub fn transports(&self) -> &[TransportConfig] {
        &self.transports
    }

    /// Finds a transport configuration by id.
    #[must_use]
    pub fn find(&self, id: TransportConfigId) -> Option<&TransportConfig> {
        self.transports.iter().find(|config| config.id() == id)
    }

    /// Inserts `config`, replacing any configuration with the same id in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    pub fn upsert(&mut self, config: TransportConfig) -> ConfigResult<()> {
        config.validate()?;
        match self
            .transports
            .iter_mut()
            .find(|existing| existing.id() == config.id())
        {
            Some(existing) => *existing = config,
            None => self.transports.push(config),
        }
        Ok(())
    }

    /// Removes the configuration with `id`, returning it when present.
    pub fn remove(&mut self, id: TransportConfigId) -> Option<TransportConfig> {
        let position = self.transports.iter().position(|config| config.id() == id)?;
        Some(self.transports.remove(position))
    }

    /// Validates every transport configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(&self) -> ConfigResult<()> {
        self.transports.iter().try_for_each(TransportConfig::validate)
    }
}

//! Configuration of a single transport.

use super::{ConfigError, ConfigResult, TransportConfigId};
use crate::formatting::domain::FormatterToggles;
use crate::producer::domain::EncodingOptions;
use serde::{Deserialize, Serialize};

/// Storage used to checkpoint consumer progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointStorage {
    /// Connection string of the checkpoint store.
    pub connection_string: String,
    /// Container holding checkpoint blobs.
    pub container_name: String,
}

/// One configured transport.
///
/// Serialises with camelCase keys:
///
/// ```json
/// {
///   "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
///   "title": "Orders",
///   "connectionString": "Endpoint=sb://orders/",
///   "name": "orders",
///   "useGzipCompression": true,
///   "useBase64Coding": false,
///   "useCheckpoints": false,
///   "messageFormatters": { "Guid replacer": true }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportConfig {
    #[serde(default)]
    id: TransportConfigId,
    title: String,
    connection_string: String,
    name: String,
    #[serde(default)]
    use_gzip_compression: bool,
    #[serde(default)]
    use_base64_coding: bool,
    #[serde(default)]
    use_checkpoints: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    storage: Option<CheckpointStorage>,
    #[serde(default)]
    message_formatters: FormatterToggles,
}

impl TransportConfig {
    /// Creates a validated configuration with a fresh id, no compression,
    /// no checkpoints, and no formatters enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] when `title`, `connection_string`
    /// or `name` is blank.
    pub fn new(
        title: impl Into<String>,
        connection_string: impl Into<String>,
        name: impl Into<String>,
    ) -> ConfigResult<Self> {
        let config = Self {
            id: TransportConfigId::new(),
            title: title.into(),
            connection_string: connection_string.into(),
            name: name.into(),
            use_gzip_compression: false,
            use_base64_coding: false,
            use_checkpoints: false,
            storage: None,
            message_formatters: FormatterToggles::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the id.
    #[must_use]
    pub const fn with_id(mut self, id: TransportConfigId) -> Self {
        self.id = id;
        self
    }

    /// Sets the compression and base64 switches.
    #[must_use]
    pub const fn with_encoding(
        mut self,
        use_gzip_compression: bool,
        use_base64_coding: bool,
    ) -> Self {
        self.use_gzip_compression = use_gzip_compression;
        self.use_base64_coding = use_base64_coding;
        self
    }

    /// Enables checkpointing backed by `storage`.
    #[must_use]
    pub fn with_checkpoints(mut self, storage: CheckpointStorage) -> Self {
        self.use_checkpoints = true;
        self.storage = Some(storage);
        self
    }

    /// Enables or disables the formatter called `name`.
    #[must_use]
    pub fn with_formatter(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.message_formatters.insert(name.into(), enabled);
        self
    }

    /// Checks the invariants that deserialisation cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] for a blank title, connection
    /// string or name, and [`ConfigError::MissingCheckpointStorage`] when
    /// checkpoints are enabled without storage settings.
    pub fn validate(&self) -> ConfigResult<()> {
        let required = [
            ("title", &self.title),
            ("connectionString", &self.connection_string),
            ("name", &self.name),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::EmptyField(*field));
        }
        if self.use_checkpoints && self.storage.is_none() {
            return Err(ConfigError::MissingCheckpointStorage);
        }
        Ok(())
    }

    /// Returns the configuration id.
    #[must_use]
    pub const fn id(&self) -> TransportConfigId {
        self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the transport connection string.
    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Returns the transport entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether consumer progress is checkpointed.
    #[must_use]
    pub const fn use_checkpoints(&self) -> bool {
        self.use_checkpoints
    }

    /// Returns the checkpoint storage settings.
    #[must_use]
    pub const fn storage(&self) -> Option<&CheckpointStorage> {
        self.storage.as_ref()
    }

    /// Returns the formatter switches.
    #[must_use]
    pub const fn message_formatters(&self) -> &FormatterToggles {
        &self.message_formatters
    }

    /// Returns the payload encoding options.
    #[must_use]
    pub const fn encoding_options(&self) -> EncodingOptions {
        EncodingOptions::new(self.use_gzip_compression, self.use_base64_coding)
    }
}

//! Domain types for transport configuration.

mod app;
mod error;
mod ids;
mod transport;

pub use app::AppConfiguration;
pub use error::{ConfigError, ConfigResult};
pub use ids::TransportConfigId;
pub use transport::{CheckpointStorage, TransportConfig};

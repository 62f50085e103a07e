//! Configuration services.

mod configuration;
mod factory;

pub use configuration::ConfigurationService;
pub use factory::MessagingFactory;

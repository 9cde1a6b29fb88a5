pub mod bootstrap_settings;
pub mod config_spec;
pub mod database;
pub mod env_provider;
pub mod errors;
pub mod logging;

pub use bootstrap_settings::BootstrapSettings;
pub use config_spec::{ConfigSpec, ConfigValue, ConfigValueSource};
pub use database::{init_database, migrate_database};
pub use env_provider::{EnvironmentProvider, MockEnvironment, SystemEnvironment};
pub use errors::ApplicationError;
pub use logging::{LoggingConfig, LoggingError, init_logging};

//! Configuration file loading and resolution.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{ConfigOverrides, LoggingConfig, ResolvedConfig, SearchConfig};

//! Common configuration and logging for tolk

pub mod config;
pub mod logging;

pub use config::{ConfigError, Settings, TranslatorConfig};
pub use logging::{init_logging, LoggingConfig, LoggingError};

//! Structured logging setup for applications embedding tolk
//!
//! The library crates only emit `tracing` events; installing a subscriber is
//! left to the host application, which can use [`init_logging`].

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};
use validator::{Validate, ValidationError};

/// Errors raised while installing the global subscriber
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    /// The log file could not be opened
    #[error("Failed to open log file: {0}")]
    Io(#[from] io::Error),

    /// A global subscriber is already installed
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "tolk_i18n=debug")
    #[validate(custom = "validate_filter")]
    pub level: String,
    /// Emit one JSON object per event
    pub json_format: bool,
    /// Use ANSI colors when writing to the terminal
    pub ansi: bool,
    /// Optional file to append to instead of stderr
    pub file_path: Option<PathBuf>,
    /// Whether to include spans in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            ansi: true,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

fn validate_filter(level: &str) -> Result<(), ValidationError> {
    EnvFilter::try_new(level)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_log_filter"))
}

/// Install a global tracing subscriber for the given configuration
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_new(&config.level).map_err(|e| LoggingError::InvalidFilter {
        filter: config.level.clone(),
        message: e.to_string(),
    })?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let (writer, ansi) = match &config.file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), config.ansi),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .with_writer(writer);
        registry.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .with_ansi(ansi)
            .with_writer(writer);
        registry.with(layer).try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.ansi);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_directive_filters_validate() {
        let config = LoggingConfig {
            level: "warn,tolk_i18n=debug".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}

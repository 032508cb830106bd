//! Configuration loading for tolk

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use validator::Validate;

/// Environment variable overriding the translator locale
pub const ENV_LOCALE: &str = "TOLK_LOCALE";
/// Environment variable overriding the default domain; empty clears it
pub const ENV_DEFAULT_DOMAIN: &str = "TOLK_DEFAULT_DOMAIN";
/// Environment variable overriding the log filter
pub const ENV_LOG_LEVEL: &str = "TOLK_LOG_LEVEL";
/// Environment variable switching JSON log output on or off
pub const ENV_LOG_JSON: &str = "TOLK_LOG_JSON";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': invalid value '{value}'")]
    EnvParseError { var: String, value: String },
}

/// Translator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Locale used when a call does not name one
    #[validate(length(min = 1, message = "Locale cannot be empty"))]
    pub locale: String,
    /// Domain applied to identifiers without a `domain.` prefix
    pub default_domain: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            default_domain: None,
        }
    }
}

/// Top-level settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Translator settings
    pub translator: TranslatorConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Settings {
    /// Parse and validate settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate_all()?;
        Ok(settings)
    }

    /// Load settings from a TOML file with environment variable overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        debug!("Loading settings from {:?}", path.as_ref());

        let content = std::fs::read_to_string(path.as_ref())?;
        let mut settings: Self = toml::from_str(&content)?;

        settings.apply_env_overrides()?;
        settings.validate_all()?;

        Ok(settings)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from any variable source
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(ENV_LOCALE) {
            self.translator.locale = locale;
        }

        if let Some(domain) = lookup(ENV_DEFAULT_DOMAIN) {
            self.translator.default_domain = (!domain.is_empty()).then_some(domain);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }

        if let Some(json) = lookup(ENV_LOG_JSON) {
            self.logging.json_format = parse_bool(&json).ok_or_else(|| ConfigError::EnvParseError {
                var: ENV_LOG_JSON.to_string(),
                value: json.clone(),
            })?;
        }

        Ok(())
    }

    /// Validate every section
    pub fn validate_all(&self) -> Result<(), ConfigError> {
        self.translator.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

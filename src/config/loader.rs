//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::Config;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading. Any of these is fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),
}

/// Load and validate configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a JSON string.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(error = %error, "Invalid target configuration");
        }
        return Err(ConfigError::Validation(errors));
    }

    Ok(config)
}

//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{CleanSetting, ScourConfig};
use std::path::Path;

/// Name of the configuration file within a project directory.
pub const CONFIG_FILE: &str = "scour.toml";

/// Loads and validates a `scour.toml` configuration from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ScourConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `scour.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ScourConfig, ConfigError> {
    let config: ScourConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and configuration values are consistent.
fn validate_config(config: &ScourConfig) -> Result<(), ConfigError> {
    if config.paths.public.trim().is_empty() {
        return Err(ConfigError::MissingField("paths.public".to_string()));
    }
    if config.paths.trace.trim().is_empty() {
        return Err(ConfigError::MissingField("paths.trace".to_string()));
    }
    if let CleanSetting::Categories(names) = &config.clean {
        if names.is_empty() {
            return Err(ConfigError::ValidationError(
                "clean category list must not be empty".to_string(),
            ));
        }
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "clean category names must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

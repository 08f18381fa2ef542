//! YAML config file loading and saving

use crate::config::Config;
use crate::error::QmkError;
use crate::system::System;
use anyhow::Result;
use std::path::Path;

/// Load and parse the YAML config file at `path`
///
/// An empty file yields the default configuration.
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or is not a
/// valid config document.
pub fn load_config(system: &dyn System, path: &Path) -> Result<Config> {
    let content = system.read_to_string(path).map_err(|e| {
        QmkError::configuration(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config = serde_yaml::from_str(&content).map_err(|e| {
        QmkError::configuration(format!(
            "Failed to parse YAML config file {}: {e}",
            path.display()
        ))
    })?;

    Ok(config)
}

/// Write `config` to `path` as YAML, replacing the file atomically
///
/// # Errors
///
/// Returns a filesystem error if the file cannot be written.
pub fn save_config(system: &dyn System, path: &Path, config: &Config) -> Result<()> {
    let content = serde_yaml::to_string(config).map_err(|e| {
        QmkError::configuration(format!("Failed to serialize config: {e}"))
    })?;

    system
        .write_atomic(path, content.as_bytes())
        .map_err(|e| {
            QmkError::filesystem(format!(
                "Failed to save config file {}: {e}",
                path.display()
            ))
        })?;

    Ok(())
}

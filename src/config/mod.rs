//! Configuration management module
//!
//! The running configuration is layered: built-in defaults, then the YAML
//! config file, then flags passed on the command line.

pub mod yaml;

use crate::cli::Args;
use crate::logging::{DEFAULT_DATETIME_FMT, DEFAULT_LOG_FILE_FMT, DEFAULT_LOG_FMT};
use crate::system::System;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal as _};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Name of the config file looked up in the home directory
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".qmk.yaml";

/// Config file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Options shared by every subcommand
    #[serde(default)]
    pub general: GeneralConfig,
}

/// The `general` section of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_fmt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_fmt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_fmt: Option<String>,
}

/// The resolved running configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Log at DEBUG instead of INFO on the console
    pub verbose: bool,
    /// Emit ANSI color on the console; `None` follows whether stderr is a terminal
    pub color: Option<bool>,
    /// Extra sink receiving every log record
    pub log_file: Option<PathBuf>,
    /// Console line template
    pub log_fmt: String,
    /// Log file line template
    pub log_file_fmt: String,
    /// strftime format for `{time}`
    pub datetime_fmt: String,
    /// Where the config was read from and would be saved to
    pub config_file: Option<PathBuf>,
    /// Write the settings back to `config_file`
    pub save_config: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            color: None,
            log_file: None,
            log_fmt: DEFAULT_LOG_FMT.to_owned(),
            log_file_fmt: DEFAULT_LOG_FILE_FMT.to_owned(),
            datetime_fmt: DEFAULT_DATETIME_FMT.to_owned(),
            config_file: None,
            save_config: false,
        }
    }
}

impl Settings {
    /// Resolve settings from the command line and the config file
    ///
    /// A missing config file is not an error.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config file exists but cannot be
    /// read or parsed.
    pub fn resolve(args: &Args, system: &dyn System) -> Result<Self> {
        let config_file = args
            .config_file
            .clone()
            .or_else(|| default_config_path(system));

        let file_config = match config_file.as_deref() {
            Some(path) if system.exists(path) => yaml::load_config(system, path)?,
            _ => Config::default(),
        };

        Ok(Self::layered(args, &file_config, config_file))
    }

    /// Settings from the command line alone, ignoring any config file
    #[must_use]
    pub fn from_args(args: &Args) -> Self {
        Self::layered(args, &Config::default(), args.config_file.clone())
    }

    fn layered(args: &Args, file_config: &Config, config_file: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        let general = &file_config.general;

        Self {
            verbose: args
                .verbose_override()
                .or(general.verbose)
                .unwrap_or(defaults.verbose),
            color: args.color_override().or(general.color),
            log_file: args.log_file.clone().or_else(|| general.log_file.clone()),
            log_fmt: args
                .log_fmt
                .clone()
                .or_else(|| general.log_fmt.clone())
                .unwrap_or(defaults.log_fmt),
            log_file_fmt: args
                .log_file_fmt
                .clone()
                .or_else(|| general.log_file_fmt.clone())
                .unwrap_or(defaults.log_file_fmt),
            datetime_fmt: args
                .datetime_fmt
                .clone()
                .or_else(|| general.datetime_fmt.clone())
                .unwrap_or(defaults.datetime_fmt),
            config_file,
            save_config: args.save_config,
        }
    }

    /// Whether console output is colored
    #[must_use]
    pub fn use_color(&self) -> bool {
        self.color.unwrap_or_else(|| io::stderr().is_terminal())
    }

    /// The config file contents that reproduce these settings
    ///
    /// An undecided color choice stays out of the file so detection keeps
    /// working.
    #[must_use]
    pub fn to_config(&self) -> Config {
        Config {
            general: GeneralConfig {
                verbose: Some(self.verbose),
                color: self.color,
                log_file: self.log_file.clone(),
                log_fmt: Some(self.log_fmt.clone()),
                log_file_fmt: Some(self.log_file_fmt.clone()),
                datetime_fmt: Some(self.datetime_fmt.clone()),
            },
        }
    }
}

/// `~/.qmk.yaml`, when a home directory is known
#[must_use]
pub fn default_config_path(system: &dyn System) -> Option<PathBuf> {
    system
        .home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_FILE_NAME))
}

/// Save the running configuration to its config file
///
/// Logs a warning and does nothing when no config file is known.
///
/// # Errors
///
/// Returns a filesystem error if the file cannot be written.
pub fn save_settings(system: &dyn System, settings: &Settings) -> Result<()> {
    let Some(path) = settings.config_file.as_deref() else {
        warn!("No config file set, not saving config!");
        return Ok(());
    };

    debug!("Saving config file to '{}'", path.display());
    yaml::save_config(system, path, &settings.to_config())
}

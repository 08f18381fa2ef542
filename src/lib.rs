//! `qmk` - a placeholder CLI with `hello` and `goodbye` subcommands
//!
//! Running without a subcommand (or with one it does not know) logs an error
//! and exits non-zero. Global options control logging and an optional YAML
//! config file, `~/.qmk.yaml` by default.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod system;

use anyhow::Result;
use cli::Command;
use config::Settings;
use std::io;
use system::System;

/// Main entry point for the qmk library
///
/// Saves the running configuration first when asked to, then runs the
/// selected subcommand with its output on stdout.
///
/// # Errors
///
/// Returns `QmkError::NoAction` for the default action, or any error from
/// saving the config or writing output.
pub fn run(settings: &Settings, command: Option<&Command>, system: &dyn System) -> Result<()> {
    if settings.save_config {
        config::save_settings(system, settings)?;
    }

    let stdout = io::stdout();
    cli::execute(command, &mut stdout.lock())
}

//! Subcommand implementations and dispatch

use crate::cli::Command;
use crate::error::QmkError;
use anyhow::{Context as _, Result};
use std::io::Write;
use tracing::debug;

/// Run the action selected by `command`, writing any output to `out`
///
/// # Errors
///
/// Returns `QmkError::NoAction` when no subcommand, or an unrecognized one,
/// was given. Returns an error if writing to `out` fails.
pub fn execute<W: Write>(command: Option<&Command>, out: &mut W) -> Result<()> {
    match command {
        Some(Command::Hello) => hello(out),
        Some(Command::Goodbye) => goodbye(out),
        Some(unknown @ Command::Unknown(_)) => {
            debug!(subcommand = unknown.name(), "Unrecognized subcommand");
            default_action()
        }
        None => default_action(),
    }
}

/// The root command has nothing to do
fn default_action() -> Result<()> {
    Err(QmkError::NoAction.into())
}

/// Print `Hello, World!`
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn hello<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Hello, World!").context("Failed to write greeting")
}

/// Print `Goodbye, World!`
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn goodbye<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Goodbye, World!").context("Failed to write farewell")
}

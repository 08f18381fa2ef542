//! Command-line interface module
//!
//! Handles argument parsing and subcommand dispatch

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;

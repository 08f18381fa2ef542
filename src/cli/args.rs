use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for qmk
#[derive(Parser, Debug, Clone)]
#[command(name = "qmk")]
#[command(about = "A placeholder CLI that says hello and goodbye")]
#[command(long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Args {
    /// Make the logging more verbose
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable color in log output
    #[arg(long, overrides_with = "no_color")]
    pub color: bool,

    /// Disable color in log output
    #[arg(long = "no-color", overrides_with = "color")]
    pub no_color: bool,

    /// File to append log messages to
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Template for console log lines: {level} {message} {time} {file} {line} {target}
    #[arg(long, value_name = "FORMAT")]
    pub log_fmt: Option<String>,

    /// Template for log file lines
    #[arg(long, value_name = "FORMAT")]
    pub log_file_fmt: Option<String>,

    /// strftime format used for {time}
    #[arg(long, value_name = "FORMAT")]
    pub datetime_fmt: Option<String>,

    /// The config file to read and/or write
    #[arg(short, long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Save the running configuration to the config file
    #[arg(long)]
    pub save_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// `Some(true)` if `--verbose` was passed, `None` otherwise
    #[must_use]
    pub const fn verbose_override(&self) -> Option<bool> {
        if self.verbose { Some(true) } else { None }
    }

    /// The color choice made on the command line, if any
    ///
    /// `--color` and `--no-color` override each other, so at most one is set.
    #[must_use]
    pub const fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }
}

/// Registered subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Say hello to the world
    Hello,

    /// Bid farewell to the world
    Goodbye,

    /// Anything else; falls through to the default action
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// The subcommand name as typed on the command line
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Hello => "hello",
            Self::Goodbye => "goodbye",
            Self::Unknown(argv) => argv.first().map_or("", String::as_str),
        }
    }
}

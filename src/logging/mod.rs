//! Logging setup
//!
//! Console records go to stderr rendered through the console template; when a
//! log file is configured every record down to DEBUG is appended there as
//! well through the file template, with any ANSI escapes removed.

pub mod ansi;
pub mod format;
pub mod template;

use crate::config::Settings;
use crate::error::QmkError;
use anyhow::{Result, anyhow};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, Layer};

pub use ansi::{StripAnsiWriter, expand_color_tokens, strip_ansi};
pub use format::TemplateFormat;
pub use template::{DEFAULT_DATETIME_FMT, DEFAULT_LOG_FILE_FMT, DEFAULT_LOG_FMT, LogTemplate};

/// Install the global subscriber described by `settings`
///
/// `RUST_LOG` takes precedence over the verbosity setting on the console.
///
/// # Errors
///
/// Returns a configuration error for an invalid datetime format, a
/// filesystem error if the log file cannot be opened, or an error if a
/// global subscriber is already installed.
pub fn init(settings: &Settings) -> Result<()> {
    let console_format = TemplateFormat::console(
        &settings.log_fmt,
        &settings.datetime_fmt,
        settings.use_color(),
    )?;
    let file_format = TemplateFormat::file(&settings.log_file_fmt, &settings.datetime_fmt)?;
    let log_file = settings.log_file.as_deref().map(open_log_file).transpose()?;

    let level = if settings.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(console_layer(console_format, io::stderr, filter))
        .with(log_file.map(|file| file_layer(file_format, Mutex::new(file))))
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}

/// Console layer writing records to `make_writer`
///
/// Without color, escapes embedded in messages are stripped too.
pub fn console_layer<S, W>(format: TemplateFormat, make_writer: W, filter: EnvFilter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let color = format.color();
    let writer = if color {
        BoxMakeWriter::new(make_writer)
    } else {
        BoxMakeWriter::new(StripAnsiWriter::new(make_writer))
    };

    fmt::layer()
        .event_format(format)
        .with_ansi(color)
        .with_writer(writer)
        .with_filter(filter)
}

/// Log file layer recording everything down to DEBUG, ANSI stripped
pub fn file_layer<S, W>(format: TemplateFormat, make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fmt::layer()
        .event_format(format)
        .with_ansi(false)
        .with_writer(StripAnsiWriter::new(make_writer))
        .with_filter(LevelFilter::DEBUG)
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            QmkError::filesystem(format!("Failed to open log file {}: {e}", path.display()))
                .into()
        })
}

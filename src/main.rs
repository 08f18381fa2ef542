//! # qmk
//!
//! ```sh
//! qmk hello      # Hello, World!
//! qmk goodbye    # Goodbye, World!
//! qmk            # logs "I don't do anything." and exits 1
//! ```
//!
//! See `qmk --help` for the global logging and config options.

use clap::Parser as _;
use qmk::cli::Args;
use qmk::config::Settings;
use qmk::error::exit_code;
use qmk::logging;
use qmk::system::RealSystem;
use std::process;
use tracing::error;

fn main() {
    let args = Args::parse();
    let system = RealSystem::new();

    let settings = match Settings::resolve(&args, &system) {
        Ok(settings) => settings,
        Err(err) => {
            // Report with whatever the command line alone asked for
            init_logging(&Settings::from_args(&args));
            fail(&err);
        }
    };
    init_logging(&settings);

    match qmk::run(&settings, args.command.as_ref(), &system) {
        Ok(()) => process::exit(0),
        Err(err) => fail(&err),
    }
}

/// Install logging, falling back to the default console format if the log
/// file or a format option is unusable
fn init_logging(settings: &Settings) {
    let Err(err) = logging::init(settings) else {
        return;
    };

    let console_only = Settings {
        log_file: None,
        log_fmt: logging::DEFAULT_LOG_FMT.to_owned(),
        datetime_fmt: logging::DEFAULT_DATETIME_FMT.to_owned(),
        ..settings.clone()
    };
    if logging::init(&console_only).is_ok() {
        error!("{err:#}");
    } else {
        eprintln!("{err:#}");
    }
    process::exit(exit_code(&err));
}

fn fail(err: &anyhow::Error) -> ! {
    error!("{err:#}");
    process::exit(exit_code(err));
}

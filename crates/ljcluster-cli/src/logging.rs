use crate::error::{CliError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    fmt,
    prelude::*,
    registry::LookupSpan,
};

/// Target prefix shared by the library and the binary.
const CRATE_TARGET: &str = "ljcluster";

fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `-v` raises only our own targets; dependencies stay at warnings or quieter.
fn console_targets(verbosity: u8, quiet: bool) -> Targets {
    let level = level_for(verbosity, quiet);
    Targets::new()
        .with_target(CRATE_TARGET, level)
        .with_default(level.min(LevelFilter::WARN))
}

/// The log file always keeps placement and energy diagnostics, even on a quiet console.
fn file_targets(verbosity: u8, quiet: bool) -> Targets {
    let level = level_for(verbosity, quiet).max(LevelFilter::DEBUG);
    Targets::new()
        .with_target(CRATE_TARGET, level)
        .with_default(LevelFilter::WARN)
}

fn file_layer<S>(path: &Path, verbosity: u8, quiet: bool) -> Result<impl Layer<S> + use<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let file = File::create(path).map_err(CliError::Io)?;
    Ok(fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(file_targets(verbosity, quiet)))
}

/// Installs the global subscriber: a compact stderr layer plus an optional plain-text file
/// layer, each with its own target filter.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(console_targets(verbosity, quiet));

    let file_layer = log_file
        .map(|path| file_layer(&path, verbosity, quiet))
        .transpose()?;

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Other(e.into()))
}

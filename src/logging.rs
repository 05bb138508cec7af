//! Tracing setup: human-readable events on stderr and in a log file.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{ClassifierError, Result};

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "../../log/classifier_classify_target.log";

/// Filter directive for a CLI verbosity level (0=quiet, 1=normal, 2=verbose, 3+=trace).
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Create (or truncate) the log file, creating missing parent directories.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

/// Install the global subscriber. `RUST_LOG` overrides the verbosity level.
pub fn init_logging(log_path: &Path, verbosity: u8) -> Result<()> {
    let file = open_log_file(log_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| ClassifierError::other(format!("cannot install logger: {e}")))
}

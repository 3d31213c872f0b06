use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};

/// Send `tracing` output to the log file. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr.
///
/// Returns the log path, or `None` when no location could be determined.
pub fn init_logging(settings: &LoggingSettings) -> io::Result<Option<PathBuf>> {
    let Some(path) = settings.file.clone().or_else(config::default_log_path) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(Some(path))
}

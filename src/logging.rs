//! `tracing` setup.
//!
//! The terminal belongs to the TUI, so log lines go to a file instead of
//! stderr. `SEGUE_LOG` overrides the configured filter.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingSettings, default_log_path};
use crate::error::{Error, Result};

/// Install the global subscriber. Returns the log file path.
pub fn init(settings: &LoggingSettings) -> Result<PathBuf> {
    let path = settings
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or_else(|| Error::Logging("no log file configured and HOME is unset".to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env("SEGUE_LOG")
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_thread_names(true),
        )
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(path)
}

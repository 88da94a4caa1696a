//! Startup-level error type.
//!
//! Anything that goes wrong after the mixer is running is logged and
//! swallowed; only failures that prevent startup surface here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::audio::HandleError;

#[derive(Error, Debug)]
pub enum Error {
    /// No usable output device.
    #[error("audio output error: {0}")]
    AudioOutput(String),

    /// A discovered track could not be opened or decoded.
    #[error("failed to load track {path:?}: {source}")]
    Track {
        path: PathBuf,
        #[source]
        source: HandleError,
    },

    #[error("no audio files found in {0:?}")]
    EmptyLibrary(PathBuf),

    #[error("logging setup failed: {0}")]
    Logging(String),

    /// Terminal or filesystem I/O.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

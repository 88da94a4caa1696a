//! The controllable playback handle consumed by the mixer.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure reported by a playback handle command.
#[derive(Debug, Error)]
pub enum HandleError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("seek failed: {0}")]
    Seek(String),

    #[error("handle unavailable: {0}")]
    Unavailable(String),
}

/// A single track's player, as seen by the fade engine and transport commands.
///
/// Implementations must not block for long: the fade engine calls these while
/// holding the registry lock, once per tick.
pub trait PlaybackHandle: Send {
    fn play(&mut self) -> Result<(), HandleError>;
    fn pause(&mut self) -> Result<(), HandleError>;
    /// Seek back to the start without changing the play/pause state.
    fn rewind(&mut self) -> Result<(), HandleError>;
    /// `volume` is a linear gain in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32) -> Result<(), HandleError>;
    fn is_playing(&self) -> bool;
    fn position(&self) -> Duration;
    /// Total length, when the container reports one.
    fn length(&self) -> Option<Duration>;
}

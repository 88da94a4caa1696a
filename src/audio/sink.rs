//! `rodio`-backed playback handle.
//!
//! Each track gets its own `Sink` connected to the shared output mixer, so
//! two tracks can be audible at once while a crossfade is in flight.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use crate::error::Error;
use crate::library::Track;

use super::handle::{HandleError, PlaybackHandle};

/// Open the default output device.
pub fn open_default_output() -> Result<OutputStream, Error> {
    let mut stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| Error::AudioOutput(e.to_string()))?;
    // rodio logs to stderr when OutputStream is dropped, which tears through the TUI.
    stream.log_on_drop(false);
    Ok(stream)
}

pub(super) fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, HandleError> {
    let file = File::open(path).map_err(|source| HandleError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Decoder::new(BufReader::new(file)).map_err(|e| HandleError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub struct SinkHandle {
    path: PathBuf,
    sink: Sink,
    length: Option<Duration>,
}

impl SinkHandle {
    /// Decode `track` and park it, paused, on a fresh sink attached to `mixer`.
    pub fn open(mixer: &Mixer, track: &Track) -> Result<Self, HandleError> {
        let source = decode(&track.path)?;
        let sink = Sink::connect_new(mixer);
        sink.append(source);
        sink.pause();
        Ok(Self {
            path: track.path.clone(),
            sink,
            length: track.length,
        })
    }

    /// Replace the sink's (possibly drained) source with a fresh decoder.
    ///
    /// The sink is left paused unless `resume` is set. A sink that ran dry
    /// on its own still reads as unpaused.
    fn reload(&self, resume: bool) -> Result<(), HandleError> {
        let source = decode(&self.path)?;
        // `clear` also pauses the sink.
        self.sink.clear();
        self.sink.append(source);
        if resume {
            self.sink.play();
        }
        Ok(())
    }
}

impl PlaybackHandle for SinkHandle {
    fn play(&mut self) -> Result<(), HandleError> {
        if self.sink.empty() {
            // Played through to the end; start over like a fresh player would.
            self.reload(true)?;
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), HandleError> {
        self.sink.pause();
        Ok(())
    }

    fn rewind(&mut self) -> Result<(), HandleError> {
        let resume = self.is_playing();
        if self.sink.empty() {
            return self.reload(resume);
        }
        if let Err(e) = self.sink.try_seek(Duration::ZERO) {
            debug!(path = ?self.path, error = %e, "seek to start failed, reloading source");
            return self.reload(resume);
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), HandleError> {
        self.sink.set_volume(volume);
        Ok(())
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    fn position(&self) -> Duration {
        if self.sink.empty() {
            return self.length.unwrap_or_default();
        }
        self.sink.get_pos()
    }

    fn length(&self) -> Option<Duration> {
        self.length
    }
}

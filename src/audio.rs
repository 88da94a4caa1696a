//! Audio output: the playback handle contract and its `rodio` implementation.
//!
//! The mixer only ever talks to [`PlaybackHandle`]; `SinkHandle` is the
//! concrete handle the runtime builds for each track.

mod handle;
mod sink;

pub use handle::{HandleError, PlaybackHandle};
pub use sink::{SinkHandle, open_default_output};

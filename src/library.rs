//! Library scanning: turns a directory of audio files into the fixed track set.
//!
//! Each file becomes one track, identified by its file stem. The set is
//! built once at startup and never changes afterwards.

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;

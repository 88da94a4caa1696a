//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the track list, the
//! cursor and the play/pause indicator of every track.

mod model;

pub use model::*;

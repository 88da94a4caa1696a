//! segue: a terminal mixer that crossfades between a handful of songs.
//!
//! The heart of the crate is [`mixer`]: a fixed-tick fade engine plus the
//! transport commands that drive it. Everything else wires it to `rodio`
//! output, a scanned directory of songs, and a `ratatui` front end.

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod mixer;
pub mod runtime;
pub mod ui;

pub use error::{Error, Result};

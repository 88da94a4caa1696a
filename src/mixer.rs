//! The fade/crossfade scheduling engine.
//!
//! A [`TrackRegistry`] holds one [`TrackEntry`] per track. The [`FadeEngine`]
//! thread advances every entry's [`Fade`] on a fixed tick, and the [`Mixer`]
//! command surface (play, stop, rewind, volume, reset) mutates the same
//! entries from the UI thread. Both sides serialize through the registry lock.

mod commands;
mod engine;
mod entry;
mod fade;
mod notify;
mod registry;

pub use commands::{Mixer, TrackSnapshot};
pub use engine::{FadeEngine, FadeTiming, tick};
pub use entry::{TrackEntry, clamp_volume};
pub use fade::{Fade, FadePhase, FadeStep};
pub use notify::{Indicator, IndicatorUpdate, NoopNotifier, Notifier};
pub use registry::{SharedRegistry, TrackRegistry, lock};

//! Transport commands: the only way callers drive the mixer.
//!
//! Every command takes the registry lock for its whole read-modify-write and
//! returns straight away; the audible effect of a fade unfolds over the
//! following engine ticks. Unknown track ids are ignored.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::engine::{FadeTiming, settle_faded_in, settle_faded_out};
use super::entry::{TrackEntry, clamp_volume};
use super::fade::{Fade, FadePhase};
use super::notify::{Indicator, Notifier};
use super::registry::{SharedRegistry, lock};

/// Read-only view of one track for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSnapshot {
    pub id: String,
    pub playing: bool,
    pub target_volume: f32,
    pub fade: FadePhase,
    pub position: Duration,
    pub length: Option<Duration>,
}

#[derive(Clone)]
pub struct Mixer {
    registry: SharedRegistry,
    timing: FadeTiming,
    notifier: Arc<dyn Notifier>,
}

impl Mixer {
    pub fn new(registry: SharedRegistry, timing: FadeTiming, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            registry,
            timing,
            notifier,
        }
    }

    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    pub fn timing(&self) -> FadeTiming {
        self.timing
    }

    /// Fade `id` in and fade out whatever else is playing.
    pub fn play(&self, id: &str) {
        let mut registry = lock(&self.registry);
        if !registry.contains(id) {
            debug!(track = id, "play: unknown track");
            return;
        }
        info!(track = id, "play");

        for (other, entry) in registry.iter_mut() {
            if other != id
                && entry.is_playing()
                && begin_fade_out(other, entry, self.timing.full)
            {
                debug!(track = other, "fading out for crossfade");
                self.notifier.indicator(other, Indicator::Paused);
            }
        }

        let Some(entry) = registry.get_mut(id) else {
            return;
        };
        if entry.is_playing() {
            if entry.fade.is_fading_out() {
                entry.fade = entry.fade.reversed(self.timing.full);
                if entry.fade.is_idle() {
                    settle_faded_in(id, entry);
                }
            }
        } else {
            entry.fade = Fade::fade_in(self.timing.full, entry.target_volume);
            // Start silent so the first tick ramps up from nothing.
            if let Err(e) = entry.handle.set_volume(0.0) {
                warn!(track = id, error = %e, "failed to silence before fade-in");
            }
            if let Err(e) = entry.handle.play() {
                warn!(track = id, error = %e, "failed to start playback");
            }
        }
        self.notifier.indicator(id, Indicator::Playing);
    }

    /// Fade `id` out; the engine pauses it once silent.
    pub fn stop(&self, id: &str) {
        let mut registry = lock(&self.registry);
        let Some(entry) = registry.get_mut(id) else {
            debug!(track = id, "stop: unknown track");
            return;
        };
        if !entry.is_playing() {
            return;
        }
        if begin_fade_out(id, entry, self.timing.full) {
            info!(track = id, "stop");
            self.notifier.indicator(id, Indicator::Paused);
        }
    }

    /// Stop `id` if it is audible and not already on its way out, else play it.
    pub fn toggle(&self, id: &str) {
        let stopping = {
            let registry = lock(&self.registry);
            registry
                .get(id)
                .map(|e| e.is_playing() && !e.fade.is_fading_out())
                .unwrap_or(false)
        };
        if stopping {
            self.stop(id);
        } else {
            self.play(id);
        }
    }

    /// Fade out every track.
    pub fn stop_all(&self) {
        let mut registry = lock(&self.registry);
        for (id, entry) in registry.iter_mut() {
            if entry.is_playing() && begin_fade_out(id, entry, self.timing.full) {
                self.notifier.indicator(id, Indicator::Paused);
            }
        }
    }

    /// Jump back to the start and cancel any fade in flight.
    pub fn rewind(&self, id: &str) {
        let mut registry = lock(&self.registry);
        let Some(entry) = registry.get_mut(id) else {
            debug!(track = id, "rewind: unknown track");
            return;
        };
        debug!(track = id, "rewind");

        if let Err(e) = entry.handle.rewind() {
            warn!(track = id, error = %e, "failed to rewind");
        }
        if entry.fade.is_idle() {
            return;
        }
        entry.fade = Fade::Idle;
        if let Err(e) = entry.handle.set_volume(entry.target_volume) {
            warn!(track = id, error = %e, "failed to restore volume after rewind");
        }
        let indicator = if entry.is_playing() {
            Indicator::Playing
        } else {
            Indicator::Paused
        };
        self.notifier.indicator(id, indicator);
    }

    /// Set the steady-state volume of `id`, clamped to `[0.0, 1.0]`.
    ///
    /// While a fade is in flight the new volume is only stored; it takes
    /// effect when the track next settles.
    pub fn set_volume(&self, id: &str, volume: f32) {
        let mut registry = lock(&self.registry);
        let Some(entry) = registry.get_mut(id) else {
            debug!(track = id, "set_volume: unknown track");
            return;
        };
        apply_volume(id, entry, volume);
    }

    /// Shift the volume of `id` by `delta`.
    pub fn adjust_volume(&self, id: &str, delta: f32) {
        let mut registry = lock(&self.registry);
        let Some(entry) = registry.get_mut(id) else {
            debug!(track = id, "adjust_volume: unknown track");
            return;
        };
        let volume = entry.target_volume + delta;
        apply_volume(id, entry, volume);
    }

    /// Pause and rewind everything, cancelling all fades.
    pub fn reset_all(&self) {
        let mut registry = lock(&self.registry);
        info!(tracks = registry.len(), "reset all");
        for (id, entry) in registry.iter_mut() {
            if let Err(e) = entry.handle.pause() {
                warn!(track = id, error = %e, "reset: failed to pause");
            }
            if let Err(e) = entry.handle.rewind() {
                warn!(track = id, error = %e, "reset: failed to rewind");
            }
            entry.fade = Fade::Idle;
            if let Err(e) = entry.handle.set_volume(entry.target_volume) {
                warn!(track = id, error = %e, "reset: failed to restore volume");
            }
            self.notifier.indicator(id, Indicator::Paused);
        }
    }

    pub fn snapshot(&self) -> Vec<TrackSnapshot> {
        let registry = lock(&self.registry);
        registry
            .iter()
            .map(|(id, entry)| TrackSnapshot {
                id: id.to_string(),
                playing: entry.is_playing(),
                target_volume: entry.target_volume,
                fade: entry.fade.phase(),
                position: entry.handle.position(),
                length: entry.handle.length(),
            })
            .collect()
    }
}

/// Put `entry` on a fade-out. Returns `false` if it was already fading out.
fn begin_fade_out(id: &str, entry: &mut TrackEntry, full: Duration) -> bool {
    match entry.fade {
        Fade::Out { .. } => false,
        Fade::In { .. } => {
            entry.fade = entry.fade.reversed(full);
            if entry.fade.is_idle() {
                settle_faded_out(id, entry);
            }
            true
        }
        Fade::Idle => {
            entry.fade = Fade::fade_out(full, entry.target_volume);
            true
        }
    }
}

fn apply_volume(id: &str, entry: &mut TrackEntry, volume: f32) {
    let volume = clamp_volume(volume);
    entry.target_volume = volume;
    debug!(track = id, volume, "volume set");
    if !entry.fade.is_idle() {
        return;
    }
    if let Err(e) = entry.handle.set_volume(volume) {
        warn!(track = id, error = %e, "failed to apply volume");
    }
}

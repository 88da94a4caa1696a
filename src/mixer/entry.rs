use crate::audio::PlaybackHandle;

use super::fade::Fade;

/// Clamp a requested volume into `[0.0, 1.0]`; NaN becomes silence.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// One track: its player plus the fade state the engine owns.
///
/// Play/pause status is never cached here; it is always read from the handle.
pub struct TrackEntry {
    pub(super) handle: Box<dyn PlaybackHandle>,
    pub(super) fade: Fade,
    pub(super) target_volume: f32,
}

impl TrackEntry {
    pub fn new(handle: Box<dyn PlaybackHandle>, target_volume: f32) -> Self {
        Self {
            handle,
            fade: Fade::Idle,
            target_volume: clamp_volume(target_volume),
        }
    }

    pub fn fade(&self) -> Fade {
        self.fade
    }

    pub fn target_volume(&self) -> f32 {
        self.target_volume
    }

    pub fn is_playing(&self) -> bool {
        self.handle.is_playing()
    }
}

//! Application model: the track list, cursor and per-track indicators.
//!
//! The `App` struct is what the UI renders; the mixer stays authoritative for
//! playback, and the model only mirrors the indicator notifications it emits.

use std::collections::HashMap;

use crate::mixer::{FadePhase, Indicator, IndicatorUpdate, TrackSnapshot};

/// The main application model.
pub struct App {
    /// Track ids in display order.
    pub tracks: Vec<String>,
    pub selected: usize,
    indicators: HashMap<String, Indicator>,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` listing `tracks`, all shown as paused.
    pub fn new(tracks: Vec<String>) -> Self {
        Self {
            tracks,
            selected: 0,
            indicators: HashMap::new(),
            current_dir: None,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// The id under the cursor.
    pub fn selected_id(&self) -> Option<&str> {
        self.tracks.get(self.selected).map(String::as_str)
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.tracks.len();
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.tracks.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn indicator(&self, id: &str) -> Indicator {
        self.indicators.get(id).copied().unwrap_or_default()
    }

    pub fn apply_indicator(&mut self, update: IndicatorUpdate) {
        self.indicators.insert(update.id, update.indicator);
    }

    /// Flip indicators of tracks that ran off their end on their own.
    ///
    /// The mixer only reports transitions it causes; a song that simply ends
    /// would otherwise keep showing as playing.
    pub fn reconcile(&mut self, snapshots: &[TrackSnapshot]) {
        for snap in snapshots {
            if !snap.playing
                && snap.fade == FadePhase::Steady
                && self.indicator(&snap.id) == Indicator::Playing
            {
                self.indicators.insert(snap.id.clone(), Indicator::Paused);
            }
        }
    }
}

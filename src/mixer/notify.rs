//! Play/pause indicator notifications for whatever renders the tracks.

use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indicator {
    /// Show the track as playing (offer "pause").
    Playing,
    /// Show the track as paused (offer "play").
    #[default]
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorUpdate {
    pub id: String,
    pub indicator: Indicator,
}

/// Receives indicator changes from the engine and the transport commands.
///
/// Called with the registry lock held, so implementations must not block or
/// call back into the mixer.
pub trait Notifier: Send + Sync {
    fn indicator(&self, id: &str, indicator: Indicator);
}

impl Notifier for Sender<IndicatorUpdate> {
    fn indicator(&self, id: &str, indicator: Indicator) {
        // The UI may already be gone during shutdown.
        let _ = self.send(IndicatorUpdate {
            id: id.to_string(),
            indicator,
        });
    }
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn indicator(&self, _id: &str, _indicator: Indicator) {}
}

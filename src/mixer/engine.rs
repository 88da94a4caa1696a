use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::MixerSettings;

use super::entry::TrackEntry;
use super::fade::FadeStep;
use super::notify::{Indicator, Notifier};
use super::registry::{SharedRegistry, TrackRegistry, lock};

/// Tick period and full fade length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTiming {
    pub tick: Duration,
    pub full: Duration,
}

impl FadeTiming {
    pub fn from_settings(settings: &MixerSettings) -> Self {
        Self {
            tick: Duration::from_millis(settings.tick_ms.max(1)),
            full: Duration::from_millis(settings.fade_ms),
        }
    }
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self::from_settings(&MixerSettings::default())
    }
}

/// Advance every entry's fade by one tick.
///
/// A failing handle is logged and skipped; its fade still advances so the
/// track does not get stuck mid-ramp.
pub fn tick(registry: &mut TrackRegistry, timing: FadeTiming, notifier: &dyn Notifier) {
    for (id, entry) in registry.iter_mut() {
        advance_entry(id, entry, timing, notifier);
    }
}

fn advance_entry(id: &str, entry: &mut TrackEntry, timing: FadeTiming, notifier: &dyn Notifier) {
    match entry.fade.advance(timing.tick, timing.full) {
        FadeStep::Steady => {}
        FadeStep::Ramp(volume) => {
            if let Err(e) = entry.handle.set_volume(volume) {
                warn!(track = id, error = %e, "failed to apply fade volume");
            }
        }
        FadeStep::FadedIn => settle_faded_in(id, entry),
        FadeStep::FadedOut => {
            settle_faded_out(id, entry);
            notifier.indicator(id, Indicator::Paused);
        }
    }
}

/// Land a finished fade-in on the entry's current target volume.
pub(super) fn settle_faded_in(id: &str, entry: &mut TrackEntry) {
    debug!(track = id, volume = entry.target_volume, "fade-in complete");
    if let Err(e) = entry.handle.set_volume(entry.target_volume) {
        warn!(track = id, error = %e, "failed to settle volume after fade-in");
    }
}

/// Pause a finished fade-out and leave it silent.
pub(super) fn settle_faded_out(id: &str, entry: &mut TrackEntry) {
    debug!(track = id, "fade-out complete, pausing");
    if let Err(e) = entry.handle.pause() {
        warn!(track = id, error = %e, "failed to pause after fade-out");
    }
    if let Err(e) = entry.handle.set_volume(0.0) {
        warn!(track = id, error = %e, "failed to silence after fade-out");
    }
}

enum EngineMsg {
    Shutdown,
}

/// Background thread that ticks the registry until shut down.
pub struct FadeEngine {
    tx: Sender<EngineMsg>,
    join: Option<JoinHandle<()>>,
}

impl FadeEngine {
    pub fn spawn(
        registry: SharedRegistry,
        timing: FadeTiming,
        notifier: Arc<dyn Notifier>,
    ) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<EngineMsg>();

        let join = thread::Builder::new()
            .name("segue-fade".to_string())
            .spawn(move || {
                info!(
                    tick_ms = timing.tick.as_millis() as u64,
                    fade_ms = timing.full.as_millis() as u64,
                    "fade engine started"
                );

                let mut next = Instant::now() + timing.tick;
                loop {
                    let wait = next.saturating_duration_since(Instant::now());
                    match rx.recv_timeout(wait) {
                        Ok(EngineMsg::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {
                            {
                                let mut registry = lock(&registry);
                                tick(&mut registry, timing, notifier.as_ref());
                            }

                            next += timing.tick;
                            let now = Instant::now();
                            if next < now {
                                // Fell behind; drop the missed ticks rather than bursting.
                                debug!(behind = ?(now - next), "fade engine overran its tick");
                                next = now + timing.tick;
                            }
                        }
                    }
                }

                info!("fade engine stopped");
            })?;

        Ok(Self {
            tx,
            join: Some(join),
        })
    }

    /// Stop ticking and wait for the thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.tx.send(EngineMsg::Shutdown);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                warn!("fade engine thread panicked");
            }
        }
    }
}

impl Drop for FadeEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

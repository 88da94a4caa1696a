use std::sync::Arc;

use rodio::OutputStream;
use tracing::info;

use crate::audio::SinkHandle;
use crate::config;
use crate::error::{Error, Result};
use crate::library::Track;
use crate::mixer::{FadeEngine, FadeTiming, Mixer, Notifier, TrackEntry, TrackRegistry};

/// Open a handle per track, fill the registry and start the fade engine.
pub fn build_mixer(
    stream: &OutputStream,
    tracks: &[Track],
    settings: &config::Settings,
    notifier: Arc<dyn Notifier>,
) -> Result<(Mixer, FadeEngine)> {
    let mut registry = TrackRegistry::new();
    for track in tracks {
        let handle = SinkHandle::open(stream.mixer(), track).map_err(|source| Error::Track {
            path: track.path.clone(),
            source,
        })?;
        let inserted = registry.insert(
            track.id.clone(),
            TrackEntry::new(Box::new(handle), settings.mixer.default_volume),
        );
        // The library scan already suffixes duplicate stems.
        debug_assert!(inserted, "duplicate track id {}", track.id);
    }
    info!(tracks = registry.len(), "track registry ready");

    let timing = FadeTiming::from_settings(&settings.mixer);
    let registry = registry.into_shared();
    let engine = FadeEngine::spawn(registry.clone(), timing, notifier.clone())?;
    Ok((Mixer::new(registry, timing, notifier), engine))
}

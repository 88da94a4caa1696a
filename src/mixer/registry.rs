use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use super::entry::TrackEntry;

/// The fixed set of tracks, in insertion order.
///
/// Populated once at startup; afterwards only the entries' fade and volume
/// fields change.
#[derive(Default)]
pub struct TrackRegistry {
    entries: Vec<(String, TrackEntry)>,
    index: HashMap<String, usize>,
}

pub type SharedRegistry = Arc<Mutex<TrackRegistry>>;

/// Lock the shared registry, recovering from a poisoned lock.
pub fn lock(registry: &SharedRegistry) -> MutexGuard<'_, TrackRegistry> {
    registry.lock().unwrap_or_else(|poisoned| {
        warn!("track registry lock was poisoned; recovering");
        poisoned.into_inner()
    })
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track. Returns `false` (and drops `entry`) if `id` is taken.
    pub fn insert(&mut self, id: impl Into<String>, entry: TrackEntry) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, entry));
        true
    }

    pub fn get(&self, id: &str) -> Option<&TrackEntry> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TrackEntry> {
        let i = *self.index.get(id)?;
        Some(&mut self.entries[i].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrackEntry)> {
        self.entries.iter().map(|(id, e)| (id.as_str(), e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut TrackEntry)> {
        self.entries.iter_mut().map(|(id, e)| (id.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }
}

use tracing::{debug, info, warn};

use crate::catalog::{Track, parse_track_list};
use crate::storage::{KeyValueStore, StorageError};

/// Storage key used when the configuration does not name one.
pub const DEFAULT_LIBRARY_KEY: &str = "library";

/// What a toggle did to the library.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Favorited tracks, kept in the order they were added.
pub struct LibraryStore<S> {
    entries: Vec<Track>,
    store: S,
    key: String,
}

impl<S: KeyValueStore> LibraryStore<S> {
    /// Load the persisted library under `key`.
    ///
    /// Absent or malformed content yields an empty library; individual invalid
    /// or duplicate entries are dropped.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let entries = match store.get(&key) {
            Ok(Some(blob)) => match parse_track_list(&blob) {
                Ok(list) => {
                    if list.rejected > 0 {
                        warn!(rejected = list.rejected, "skipped invalid library entries");
                    }
                    list.tracks
                }
                Err(e) => {
                    warn!("stored library is malformed, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("failed to read stored library, starting empty: {e}");
                Vec::new()
            }
        };

        info!(entries = entries.len(), key = %key, "library loaded");
        Self {
            entries,
            store,
            key,
        }
    }

    pub fn entries(&self) -> &[Track] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.entries.iter().any(|t| t.id() == id)
    }

    /// Add `track` if it is not a favorite yet, remove it otherwise, then
    /// persist the full set.
    ///
    /// When the write fails the change is undone, so memory and storage agree.
    pub fn toggle(&mut self, track: &Track) -> Result<Toggled, StorageError> {
        let outcome = match self.entries.iter().position(|t| t.id() == track.id()) {
            Some(pos) => {
                let removed = self.entries.remove(pos);
                if let Err(e) = self.persist() {
                    self.entries.insert(pos, removed);
                    return Err(e);
                }
                Toggled::Removed
            }
            None => {
                self.entries.push(track.clone());
                if let Err(e) = self.persist() {
                    self.entries.pop();
                    return Err(e);
                }
                Toggled::Added
            }
        };

        debug!(id = track.id(), ?outcome, entries = self.entries.len(), "library toggled");
        Ok(outcome)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.entries)?;
        self.store.set(&self.key, &blob)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}

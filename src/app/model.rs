//! Application model types: `App` and `View`.
//!
//! The `App` struct holds every piece of state the UI reads, with one method
//! per user action so transitions can be tested without a terminal.

use std::sync::Arc;

use tracing::error;

use crate::audio::AudioDevice;
use crate::catalog::{Catalog, Track};
use crate::library::{LibraryStore, Toggled};
use crate::player::{PlaybackController, Queue};
use crate::storage::KeyValueStore;

/// Which list is displayed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Catalog,
    Library,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            Self::Catalog => "All Songs",
            Self::Library => "Your Library",
        }
    }

    /// Text shown when the list is empty.
    pub fn empty_text(self) -> &'static str {
        match self {
            Self::Catalog => "No songs found.",
            Self::Library => "No songs in your library yet.",
        }
    }
}

/// The main application model.
pub struct App<S, D> {
    pub catalog: Catalog,
    pub library: LibraryStore<S>,
    pub player: PlaybackController<D>,
    pub view: View,
    /// Cursor position in the displayed list.
    pub selected: usize,
    /// One-line notice for the status box (e.g. a failed save).
    pub notice: Option<String>,
}

impl<S: KeyValueStore, D: AudioDevice> App<S, D> {
    /// Create a new `App` showing the catalog.
    pub fn new(catalog: Catalog, library: LibraryStore<S>, player: PlaybackController<D>) -> Self {
        Self {
            catalog,
            library,
            player,
            view: View::Catalog,
            selected: 0,
            notice: None,
        }
    }

    /// The list currently displayed.
    pub fn displayed(&self) -> &[Track] {
        match self.view {
            View::Catalog => self.catalog.tracks(),
            View::Library => self.library.entries(),
        }
    }

    /// Return true if the displayed list contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.displayed().is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.displayed().get(self.selected)
    }

    pub fn is_favorite(&self, track: &Track) -> bool {
        self.library.is_favorite(track.id())
    }

    /// Switch the displayed list and put the cursor on its first track.
    pub fn show(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.selected = 0;
        }
    }

    pub fn toggle_view(&mut self) {
        let next = match self.view {
            View::Catalog => View::Library,
            View::Library => View::Catalog,
        };
        self.show(next);
    }

    /// Move selection to the next track. Wraps around to the first element.
    pub fn next(&mut self) {
        let len = self.displayed().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection to the previous track. Wraps around to the last element.
    pub fn prev(&mut self) {
        let len = self.displayed().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.displayed().len().saturating_sub(1);
    }

    /// Play the track under the cursor. Navigation afterwards follows a
    /// snapshot of the displayed list.
    pub fn play_selected(&mut self) {
        if !self.has_tracks() {
            return;
        }
        let queue: Queue = Arc::from(self.displayed());
        if let Err(e) = self.player.select(queue, self.selected) {
            error!("cannot play selection: {e}");
        }
    }

    /// Add or remove the track under the cursor from the library.
    pub fn toggle_favorite_selected(&mut self) {
        let Some(track) = self.selected_track().cloned() else {
            return;
        };

        match self.library.toggle(&track) {
            Ok(Toggled::Added) => self.notice = Some(format!("Added {}", track.title)),
            Ok(Toggled::Removed) => self.notice = Some(format!("Removed {}", track.title)),
            Err(e) => {
                error!("failed to save library: {e}");
                self.notice = Some("Could not save your library".to_string());
            }
        }
        self.clamp_selected();
    }

    /// Keep the cursor inside the displayed list after it shrank.
    fn clamp_selected(&mut self) {
        let len = self.displayed().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

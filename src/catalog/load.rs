use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{error, info, warn};

use super::model::Track;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog is not a JSON array of track records: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tracks that survived validation plus how many records were refused.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrackList {
    pub tracks: Vec<Track>,
    pub rejected: usize,
}

/// Parse a JSON array of track records.
///
/// Records that fail validation and records whose id was already seen are
/// dropped and counted in `rejected`. Only a non-array document is an error.
pub fn parse_track_list(json: &str) -> Result<TrackList, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_str(json)?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut list = TrackList::default();
    for record in records {
        match serde_json::from_value::<Track>(record) {
            Ok(track) if seen.insert(track.id().to_string()) => list.tracks.push(track),
            Ok(track) => {
                warn!(id = track.id(), "dropping duplicate track record");
                list.rejected += 1;
            }
            Err(e) => {
                warn!("dropping track record: {e}");
                list.rejected += 1;
            }
        }
    }
    Ok(list)
}

/// The ordered, read-only list of tracks available this session.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
    rejected: usize,
}

impl Catalog {
    pub fn new(list: TrackList) -> Self {
        Self {
            tracks: list.tracks,
            rejected: list.rejected,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Number of records refused at load time.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Look a track up by id.
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }
}

/// Read and validate the catalog at `path`.
pub fn try_load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Catalog::new(parse_track_list(&json)?))
}

/// Load the catalog once at startup. Failures are logged and yield an empty
/// catalog so the UI can show its empty state.
pub fn load_catalog(path: &Path) -> Catalog {
    match try_load_catalog(path) {
        Ok(catalog) => {
            if catalog.rejected() > 0 {
                warn!(
                    rejected = catalog.rejected(),
                    "some catalog records were invalid and were skipped"
                );
            }
            info!(tracks = catalog.len(), path = %path.display(), "catalog loaded");
            catalog
        }
        Err(e) => {
            error!("error loading songs: {e}");
            Catalog::default()
        }
    }
}

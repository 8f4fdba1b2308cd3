use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One playable item, as listed in the catalog resource.
///
/// The same record shape is used for library entries, so a favorited track is
/// stored exactly as it was read from the catalog. The `file` name doubles as
/// the stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrack")]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub file: String,
    #[serde(rename = "img", skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
}

impl Track {
    pub fn id(&self) -> &str {
        &self.file
    }

    /// "Artist - Title", used by the list and the player.
    pub fn display(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }

    /// Resolve the audio locator under `songs_dir`.
    pub fn source_in(&self, songs_dir: &Path) -> PathBuf {
        songs_dir.join(&self.file)
    }
}

/// Unvalidated record as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawTrack {
    title: Option<String>,
    artist: Option<String>,
    file: Option<String>,
    img: Option<String>,
}

/// Why a record was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("track record is missing `{0}`")]
pub struct MissingField(pub &'static str);

fn required(value: Option<String>, name: &'static str) -> Result<String, MissingField> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(MissingField(name)),
    }
}

impl TryFrom<RawTrack> for Track {
    type Error = MissingField;

    fn try_from(raw: RawTrack) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required(raw.title, "title")?,
            artist: required(raw.artist, "artist")?,
            file: required(raw.file, "file")?,
            artwork: raw.img.filter(|s| !s.trim().is_empty()),
        })
    }
}

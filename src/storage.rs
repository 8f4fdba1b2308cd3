//! Small key-value persistence used by the library store.
//!
//! Each key maps to one string blob. The file-backed store keeps every key in
//! `<dir>/<key>.json` and replaces it through a temporary file, so a crash in
//! the middle of a write never leaves a truncated blob behind.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed for {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    /// Read the blob stored under `key`, `None` when nothing was stored yet.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Replace the blob stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;
        Ok(())
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StorageError {
    let path = path.to_path_buf();
    move |source| StorageError::Io { path, source }
}

/// Default directory for persisted data: `$XDG_DATA_HOME/playdeck` or
/// `~/.local/share/playdeck`.
pub fn default_data_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    };

    data_home.map(|d| d.join("playdeck"))
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub values: std::collections::HashMap<String, String>,
    /// When set, every `set` fails.
    pub fail_writes: bool,
    pub writes: usize,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io {
                path: PathBuf::from(key),
                source: io::Error::other("write refused"),
            });
        }
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

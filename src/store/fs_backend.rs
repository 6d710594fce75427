use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::backend::StorageBackend;
use crate::error::{Result, TaskError};

/// File-backed storage: one JSON document per key in a data directory.
///
/// Stands in for the browser's local storage in native environments.
/// Writes are atomic (tmp file then rename) so a crash mid-write leaves
/// the previous snapshot intact.
pub struct FsBackend {
    dir: PathBuf,
}

impl FsBackend {
    /// Opens a backend rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Opens a backend in the platform data directory for taskdeck.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "taskdeck").ok_or_else(|| {
            TaskError::Persistence("could not determine a platform data directory".into())
        })?;
        Self::new(dirs.data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, payload)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| TaskError::Persistence(format!("write of '{}' failed: {}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

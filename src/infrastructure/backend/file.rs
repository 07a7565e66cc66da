//! File-backed storage
//!
//! One JSON document per logical key under a data directory, written
//! atomically (temp file + rename) so a crashed write never leaves a
//! half-serialized collection behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::ports::{BackendError, BackendResult, StorageBackend};

/// Directory-of-documents backend
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root`. The directory is created on
    /// first write, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory documents live in
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

fn map_io(err: std::io::Error) -> BackendError {
    // ENOSPC becomes the quota variant so the store can surface
    // capacity exhaustion distinctly.
    if err.kind() == std::io::ErrorKind::StorageFull || err.raw_os_error() == Some(28) {
        BackendError::QuotaExceeded
    } else {
        BackendError::Io(err.to_string())
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> BackendResult<Option<String>> {
        let path = self.document_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(map_io(err)),
        }
    }

    fn write(&self, key: &str, value: &str) -> BackendResult<()> {
        std::fs::create_dir_all(&self.root).map_err(map_io)?;

        let path = self.document_path(key);
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        {
            let mut file = std::fs::File::create(&tmp).map_err(map_io)?;
            file.write_all(value.as_bytes()).map_err(map_io)?;
            file.sync_all().map_err(map_io)?;
        }
        std::fs::rename(&tmp, &path).map_err(map_io)
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        let path = self.document_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(map_io(err)),
        }
    }
}

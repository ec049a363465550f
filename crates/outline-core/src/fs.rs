//! File system probes used by the caches.

use crate::error::{CoreError, Result};
use crate::path::normalize_path;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Read-only view of a file system.
///
/// `stat` is the change-detection signal: a cache considers its entry valid
/// exactly when the stored modification time equals the current one.
pub trait FileSystemProbe: Send + Sync {
    /// Current modification time of `path`.
    fn stat(&self, path: &Path) -> Result<SystemTime>;

    /// Full UTF-8 contents of `path`.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Probe backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystemProbe for StdFileSystem {
    fn stat(&self, path: &Path) -> Result<SystemTime> {
        let metadata = std::fs::metadata(path).map_err(|e| CoreError::from_io(path, e))?;
        if !metadata.is_file() {
            return Err(CoreError::NotFound(path.to_path_buf()));
        }
        metadata.modified().map_err(|e| CoreError::from_io(path, e))
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))
    }
}

#[derive(Debug, Clone)]
struct MemoryFile {
    text: String,
    modified: SystemTime,
}

/// In-memory probe for unsaved buffers and tests.
///
/// Every write stamps the file with a logical clock tick, so a rewrite
/// always yields a strictly newer modification time.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<PathBuf, MemoryFile>>,
    clock: AtomicU64,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a file, bumping its modification time.
    pub fn write(&self, path: impl AsRef<Path>, text: impl Into<String>) {
        let tick = self.clock.fetch_add(1, Ordering::Relaxed) + 1;
        let file = MemoryFile {
            text: text.into(),
            modified: UNIX_EPOCH + Duration::from_millis(tick),
        };
        self.files
            .write()
            .insert(normalize_path(path.as_ref()), file);
    }

    /// Remove a file. Returns whether it existed.
    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        self.files
            .write()
            .remove(&normalize_path(path.as_ref()))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    fn lookup(&self, path: &Path) -> Result<MemoryFile> {
        self.files
            .read()
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| CoreError::NotFound(path.to_path_buf()))
    }
}

impl FileSystemProbe for MemoryFileSystem {
    fn stat(&self, path: &Path) -> Result<SystemTime> {
        self.lookup(path).map(|file| file.modified)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.lookup(path).map(|file| file.text)
    }
}

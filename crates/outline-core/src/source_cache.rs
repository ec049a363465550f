//! Parsed-tree cache keyed by file path and validated by modification time.

use crate::error::{CoreError, Result};
use crate::frontend::LanguageFrontend;
use crate::fs::FileSystemProbe;
use crate::metrics::{CacheStats, CacheStatsSnapshot};
use crate::path::normalize_path;
use crate::store::{effective_capacity, CacheEntry, Insertion, LruStore};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, trace};

/// Default number of trees kept by a [`SourceFileCache`].
pub const DEFAULT_SOURCE_FILE_CAPACITY: usize = 100;

/// Keeps one parsed tree per file, reparsing only when the file's
/// modification time moves.
///
/// Every `get` performs exactly one stat. A warm hit does no further I/O.
/// The lock is held only while the store is inspected or updated, never
/// across stat, read or parse, so concurrent misses on one path may parse
/// twice; they still converge on a single stored tree.
pub struct SourceFileCache<F: LanguageFrontend> {
    frontend: Arc<F>,
    fs: Arc<dyn FileSystemProbe>,
    entries: Mutex<LruStore<PathBuf, F::Tree, SystemTime>>,
    stats: CacheStats,
}

impl<F: LanguageFrontend> SourceFileCache<F> {
    /// Create a cache holding at most `capacity` trees.
    pub fn new(frontend: Arc<F>, fs: Arc<dyn FileSystemProbe>, capacity: usize) -> Self {
        Self {
            frontend,
            fs,
            entries: Mutex::new(LruStore::with_capacity(effective_capacity(
                capacity,
                "source_file",
            ))),
            stats: CacheStats::new(),
        }
    }

    pub fn builder() -> SourceFileCacheBuilder<F> {
        SourceFileCacheBuilder::default()
    }

    /// Return an up-to-date tree for `path`.
    ///
    /// Fails only when the file cannot be stat'd or read. Syntax errors are
    /// carried inside the returned tree.
    pub fn get(&self, path: impl AsRef<Path>) -> Result<Arc<F::Tree>> {
        let key = normalize_path(path.as_ref());
        let modified = self.fs.stat(&key)?;

        if let Some(tree) = self.lookup(&key, modified) {
            self.stats.record_hit();
            trace!(path = ?key, "Source file cache hit");
            return Ok(tree);
        }

        self.stats.record_miss();
        let text = self.fs.read_text(&key)?;
        let tree = Arc::new(self.frontend.parse(&key, &text));
        debug!(path = ?key, bytes = text.len(), "Parsed source file");

        let (tree, insertion) = self.entries.lock().insert_unless(
            key.clone(),
            CacheEntry::new(tree, modified),
            |existing| existing.validity == modified,
        );
        if let Some(Insertion::Evicted(evicted)) = insertion {
            self.stats.record_eviction();
            debug!(path = ?evicted, "Evicted source file from cache");
        }

        Ok(tree)
    }

    fn lookup(&self, key: &Path, modified: SystemTime) -> Option<Arc<F::Tree>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.validity == modified => Some(entry.value.clone()),
            _ => None,
        }
    }

    /// Drop the tree for `path`, if any. Returns whether one was cached.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let key = normalize_path(path.as_ref());
        let removed = self.entries.lock().remove(&key).is_some();
        if removed {
            self.stats.record_invalidation();
            debug!(path = ?key, "Invalidated source file");
        }
        removed
    }

    /// Drop every cached tree.
    pub fn clear(&self) {
        self.entries.lock().clear();
        debug!("Cleared source file cache");
    }

    /// Number of cached trees.
    pub fn size(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().capacity()
    }

    /// Whether a tree for `path` is cached, without touching recency.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries
            .lock()
            .contains(&normalize_path(path.as_ref()))
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn frontend(&self) -> &Arc<F> {
        &self.frontend
    }
}

/// Builder for [`SourceFileCache`] that rejects missing collaborators.
pub struct SourceFileCacheBuilder<F: LanguageFrontend> {
    frontend: Option<Arc<F>>,
    fs: Option<Arc<dyn FileSystemProbe>>,
    capacity: usize,
}

impl<F: LanguageFrontend> Default for SourceFileCacheBuilder<F> {
    fn default() -> Self {
        Self {
            frontend: None,
            fs: None,
            capacity: DEFAULT_SOURCE_FILE_CAPACITY,
        }
    }
}

impl<F: LanguageFrontend> SourceFileCacheBuilder<F> {
    pub fn frontend(mut self, frontend: Arc<F>) -> Self {
        self.frontend = Some(frontend);
        self
    }

    pub fn file_system(mut self, fs: Arc<dyn FileSystemProbe>) -> Self {
        self.fs = Some(fs);
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> Result<SourceFileCache<F>> {
        let frontend = self
            .frontend
            .ok_or(CoreError::MissingCollaborator("frontend"))?;
        let fs = self
            .fs
            .ok_or(CoreError::MissingCollaborator("file system probe"))?;
        Ok(SourceFileCache::new(frontend, fs, self.capacity))
    }
}

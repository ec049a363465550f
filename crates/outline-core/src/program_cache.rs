//! Program cache keyed by the set of member files.
//!
//! A program's identity depends on which files were compiled together, so it
//! cannot share storage with the single-file [`crate::SourceFileCache`]: two
//! file sets that overlap must never collide.

use crate::config::CompilerOptions;
use crate::error::{CoreError, Result};
use crate::frontend::{LanguageFrontend, ProgramHandle, SyntaxTree};
use crate::metrics::{CacheStats, CacheStatsSnapshot};
use crate::path::normalize_path;
use crate::store::{effective_capacity, CacheEntry, Insertion, LruStore};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Default number of programs kept by a [`ProgramCache`].
pub const DEFAULT_PROGRAM_CAPACITY: usize = 10;

type CheckerOf<F> = <<F as LanguageFrontend>::Program as ProgramHandle>::Checker;

/// Canonical cache key for a file set.
///
/// Paths are normalised and de-duplicated, then a copy is sorted, so any
/// ordering of the same files maps to the same key. Paths are kept as-is
/// rather than converted to strings, so distinct non-UTF-8 names stay
/// distinct.
pub fn program_key<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut key: Vec<PathBuf> = paths.iter().map(|p| normalize_path(p.as_ref())).collect();
    key.sort();
    key.dedup();
    key
}

/// Normalised paths in caller order, first occurrence wins.
fn unique_roots<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .map(|p| normalize_path(p.as_ref()))
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// Builds programs through the frontend and keeps the most recently used
/// ones, one per distinct file set.
///
/// Compiler options are fixed at construction. As with the source file
/// cache, the lock is not held while a program builds; racing misses on one
/// key converge on whichever program was stored first.
pub struct ProgramCache<F: LanguageFrontend> {
    frontend: Arc<F>,
    options: CompilerOptions,
    programs: Mutex<LruStore<Vec<PathBuf>, F::Program>>,
    stats: CacheStats,
}

impl<F: LanguageFrontend> ProgramCache<F> {
    pub fn new(frontend: Arc<F>, options: CompilerOptions, capacity: usize) -> Self {
        Self {
            frontend,
            options,
            programs: Mutex::new(LruStore::with_capacity(effective_capacity(
                capacity, "program",
            ))),
            stats: CacheStats::new(),
        }
    }

    pub fn builder() -> ProgramCacheBuilder<F> {
        ProgramCacheBuilder::default()
    }

    /// Return the program for this file set, building it on first use.
    ///
    /// `paths` is only read; its order does not affect which program is
    /// returned.
    pub fn get_program<P: AsRef<Path>>(&self, paths: &[P]) -> Arc<F::Program> {
        let roots = unique_roots(paths);
        let key = program_key(&roots);

        let cached = self
            .programs
            .lock()
            .get(&key)
            .map(|entry| entry.value.clone());
        if let Some(program) = cached {
            self.stats.record_hit();
            trace!(files = roots.len(), "Program cache hit");
            return program;
        }

        self.stats.record_miss();
        let program = Arc::new(self.frontend.create_program(&roots, &self.options));
        debug!(files = roots.len(), "Built program");

        let (program, insertion) =
            self.programs
                .lock()
                .insert_unless(key, CacheEntry::new(program, ()), |_| true);
        if let Some(Insertion::Evicted(evicted)) = insertion {
            self.stats.record_eviction();
            debug!(
                files = evicted.len(),
                "Evicted program from cache"
            );
        }

        program
    }

    /// Query surface of the program for this file set.
    pub fn get_type_checker<P: AsRef<Path>>(&self, paths: &[P]) -> Arc<CheckerOf<F>> {
        self.get_program(paths).type_checker()
    }

    /// Tree for `path` taken from its single-file program, if the frontend
    /// produced one.
    pub fn get_source_file(&self, path: impl AsRef<Path>) -> Option<Arc<F::Tree>> {
        let key = normalize_path(path.as_ref());
        let program = self.get_program(&[&key]);
        let found = program
            .source_files()
            .iter()
            .find(|tree| normalize_path(tree.path()) == key)
            .cloned();
        found
    }

    /// Drop every cached program.
    pub fn clear_cache(&self) {
        self.programs.lock().clear();
        debug!("Cleared program cache");
    }

    /// Number of cached programs.
    pub fn size(&self) -> usize {
        self.programs.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.programs.lock().capacity()
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }
}

/// Builder for [`ProgramCache`] that rejects a missing frontend.
pub struct ProgramCacheBuilder<F: LanguageFrontend> {
    frontend: Option<Arc<F>>,
    options: CompilerOptions,
    capacity: usize,
}

impl<F: LanguageFrontend> Default for ProgramCacheBuilder<F> {
    fn default() -> Self {
        Self {
            frontend: None,
            options: CompilerOptions::default(),
            capacity: DEFAULT_PROGRAM_CAPACITY,
        }
    }
}

impl<F: LanguageFrontend> ProgramCacheBuilder<F> {
    pub fn frontend(mut self, frontend: Arc<F>) -> Self {
        self.frontend = Some(frontend);
        self
    }

    pub fn options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> Result<ProgramCache<F>> {
        let frontend = self
            .frontend
            .ok_or(CoreError::MissingCollaborator("frontend"))?;
        Ok(ProgramCache::new(frontend, self.options, self.capacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsxMode;
    use crate::testing::StubFrontend;

    fn cache(capacity: usize) -> (Arc<StubFrontend>, ProgramCache<StubFrontend>) {
        let frontend = Arc::new(StubFrontend::default());
        let cache = ProgramCache::new(frontend.clone(), CompilerOptions::default(), capacity);
        (frontend, cache)
    }

    #[test]
    fn test_key_is_order_independent() {
        assert_eq!(
            program_key(&["/w/a.ts", "/w/b.ts"]),
            program_key(&["/w/b.ts", "/w/a.ts"])
        );
        assert_ne!(program_key(&["/w/a.ts"]), program_key(&["/w/a.ts", "/w/b.ts"]));
    }

    #[test]
    fn test_key_ignores_duplicates_and_spelling() {
        assert_eq!(
            program_key(&["/w/a.ts", "/w/./a.ts", "/w/b.ts"]),
            program_key(&["/w/b.ts", "/w/a.ts"])
        );
    }

    #[test]
    fn test_empty_set_key() {
        let empty: [&str; 0] = [];
        assert!(program_key(&empty).is_empty());
    }

    #[test]
    fn test_order_independent_handles() {
        let (frontend, cache) = cache(4);
        let ab = cache.get_program(&["/w/a.ts", "/w/b.ts"]);
        let ba = cache.get_program(&["/w/b.ts", "/w/a.ts"]);

        assert!(Arc::ptr_eq(&ab, &ba));
        assert_eq!(frontend.builds(), 1);
    }

    #[test]
    fn test_caller_order_untouched() {
        let (_, cache) = cache(4);
        let paths = vec![
            PathBuf::from("/w/z.ts"),
            PathBuf::from("/w/a.ts"),
            PathBuf::from("/w/m.ts"),
        ];
        let before = paths.clone();

        let program = cache.get_program(&paths);

        assert_eq!(paths, before);
        assert_eq!(program.roots, before);
    }

    #[test]
    fn test_overlapping_sets_do_not_collide() {
        let (frontend, cache) = cache(4);
        let a = cache.get_program(&["/w/a.ts"]);
        let ab = cache.get_program(&["/w/a.ts", "/w/b.ts"]);

        assert!(!Arc::ptr_eq(&a, &ab));
        assert_eq!(frontend.builds(), 2);
        assert_eq!(cache.size(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_sets_do_not_collide() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (frontend, cache) = cache(4);
        let a = PathBuf::from(OsStr::from_bytes(b"/w/\xff.ts"));
        let b = PathBuf::from(OsStr::from_bytes(b"/w/\xfe.ts"));
        assert_ne!(program_key(&[&a]), program_key(&[&b]));

        let pa = cache.get_program(&[&a]);
        let pb = cache.get_program(&[&b]);

        assert!(!Arc::ptr_eq(&pa, &pb));
        assert_eq!(frontend.builds(), 2);
        assert_eq!(pb.roots, vec![b]);
    }

    #[test]
    fn test_options_fixed_at_construction() {
        let frontend = Arc::new(StubFrontend::default());
        let options = CompilerOptions {
            jsx: JsxMode::None,
            ..CompilerOptions::default()
        };
        let cache = ProgramCache::new(frontend, options.clone(), 2);

        let program = cache.get_program(&["/w/a.ts"]);
        assert_eq!(program.options, options);
        assert_eq!(cache.options(), &options);
    }

    #[test]
    fn test_lru_eviction() {
        let (frontend, cache) = cache(2);
        let a = cache.get_program(&["/w/a.ts"]);
        cache.get_program(&["/w/b.ts"]);
        cache.get_program(&["/w/a.ts"]);
        cache.get_program(&["/w/c.ts"]);

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.stats().evictions, 1);

        // a survived, b was evicted
        let again = cache.get_program(&["/w/a.ts"]);
        assert!(Arc::ptr_eq(&a, &again));
        let builds = frontend.builds();
        cache.get_program(&["/w/b.ts"]);
        assert_eq!(frontend.builds(), builds + 1);
    }

    #[test]
    fn test_type_checker_delegates() {
        let (frontend, cache) = cache(2);
        let checker = cache.get_type_checker(&["/w/b.ts", "/w/a.ts"]);
        assert_eq!(*checker, vec![PathBuf::from("/w/b.ts"), PathBuf::from("/w/a.ts")]);

        cache.get_program(&["/w/a.ts", "/w/b.ts"]);
        assert_eq!(frontend.builds(), 1);
    }

    #[test]
    fn test_get_source_file() {
        let (_, cache) = cache(2);
        let tree = cache.get_source_file("/w/src/../a.ts").unwrap();
        assert_eq!(tree.path(), Path::new("/w/a.ts"));
    }

    #[test]
    fn test_clear_cache() {
        let (frontend, cache) = cache(2);
        cache.get_program(&["/w/a.ts"]);
        cache.clear_cache();
        assert_eq!(cache.size(), 0);

        cache.get_program(&["/w/a.ts"]);
        assert_eq!(frontend.builds(), 2);
    }

    #[test]
    fn test_builder_requires_frontend() {
        let err = ProgramCache::<StubFrontend>::builder().build().err().unwrap();
        assert!(matches!(err, CoreError::MissingCollaborator("frontend")));

        let cache = ProgramCache::builder()
            .frontend(Arc::new(StubFrontend::default()))
            .capacity(5)
            .build()
            .unwrap();
        assert_eq!(cache.capacity(), 5);
        assert_eq!(cache.options(), &CompilerOptions::default());
    }
}

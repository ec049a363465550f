//! Outline Core Components
//!
//! This crate provides the caching layer between callers and a language
//! frontend:
//! - `SourceFileCache`: one parsed tree per file, revalidated by mtime
//! - `ProgramCache`: one compiled program per file set, keyed order-independently
//! - The shared LRU store, configuration, and diagnostic model

mod config;
mod diagnostic;
mod error;
mod frontend;
mod fs;
mod metrics;
mod path;
mod program_cache;
mod source_cache;
mod store;

#[cfg(test)]
mod testing;

pub use config::{CompilerOptions, EngineConfig, JsxMode, ModuleKind, ScriptTarget};
pub use diagnostic::{Diagnostic, DiagnosticCategory, Location, Position};
pub use error::{CoreError, Result};
pub use frontend::{LanguageFrontend, ProgramHandle, SyntaxTree};
pub use fs::{FileSystemProbe, MemoryFileSystem, StdFileSystem};
pub use metrics::{CacheStats, CacheStatsSnapshot};
pub use path::normalize_path;
pub use program_cache::{program_key, ProgramCache, ProgramCacheBuilder, DEFAULT_PROGRAM_CAPACITY};
pub use source_cache::{SourceFileCache, SourceFileCacheBuilder, DEFAULT_SOURCE_FILE_CAPACITY};
pub use store::{CacheEntry, Insertion, LruStore};

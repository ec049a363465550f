//! A source cache, a program cache and the analyzer wired together.

use crate::error::Result;
use crate::model::StructureAnalysisResult;
use crate::structure::analyze;
use outline_core::{
    Diagnostic, EngineConfig, FileSystemProbe, ProgramCache, ProgramHandle, SourceFileCache,
    StdFileSystem,
};
use outline_syntax::TypeScriptFrontend;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// One frontend shared by both caches, configured from an [`EngineConfig`].
///
/// Safe to share across threads; all methods take `&self`.
pub struct Workspace {
    config: EngineConfig,
    sources: SourceFileCache<TypeScriptFrontend>,
    programs: ProgramCache<TypeScriptFrontend>,
}

impl Workspace {
    /// Create a workspace reading from the local disk.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_file_system(config, Arc::new(StdFileSystem))
    }

    /// Create a workspace over a custom file system, such as an in-memory overlay.
    pub fn with_file_system(config: EngineConfig, fs: Arc<dyn FileSystemProbe>) -> Self {
        let frontend = Arc::new(TypeScriptFrontend::new(fs.clone()));
        let sources = SourceFileCache::new(
            frontend.clone(),
            fs,
            config.source_file_cache_capacity,
        );
        let programs = ProgramCache::new(
            frontend,
            config.compiler.clone(),
            config.program_cache_capacity,
        );

        info!(
            source_capacity = sources.capacity(),
            program_capacity = programs.capacity(),
            "Workspace ready"
        );

        Self {
            config,
            sources,
            programs,
        }
    }

    /// Analyze one file through the source cache.
    ///
    /// Fails only when the file cannot be stat'd or read.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<StructureAnalysisResult> {
        let tree = self.sources.get(path)?;
        Ok(analyze(&tree))
    }

    /// All diagnostics of the program built from `paths`.
    pub fn program_diagnostics<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<Diagnostic> {
        self.programs.get_program(paths).diagnostics()
    }

    pub fn source_cache(&self) -> &SourceFileCache<TypeScriptFrontend> {
        &self.sources
    }

    pub fn program_cache(&self) -> &ProgramCache<TypeScriptFrontend> {
        &self.programs
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

//! Stub frontend and counting probe for unit tests.

use crate::config::CompilerOptions;
use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::frontend::{LanguageFrontend, ProgramHandle, SyntaxTree};
use crate::fs::{FileSystemProbe, MemoryFileSystem};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Debug)]
pub struct StubTree {
    pub path: PathBuf,
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree for StubTree {
    fn path(&self) -> &Path {
        &self.path
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

pub struct StubProgram {
    pub roots: Vec<PathBuf>,
    pub files: Vec<Arc<StubTree>>,
    pub options: CompilerOptions,
}

impl ProgramHandle for StubProgram {
    type Tree = StubTree;
    type Checker = Vec<PathBuf>;

    fn source_files(&self) -> &[Arc<StubTree>] {
        &self.files
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        self.files
            .iter()
            .flat_map(|f| f.diagnostics.iter().cloned())
            .collect()
    }

    fn type_checker(&self) -> Arc<Vec<PathBuf>> {
        Arc::new(self.roots.clone())
    }
}

/// Records every parse and program build; `!` in the text yields an error.
#[derive(Default)]
pub struct StubFrontend {
    pub parses: AtomicUsize,
    pub builds: AtomicUsize,
}

impl StubFrontend {
    pub fn parses(&self) -> usize {
        self.parses.load(Ordering::SeqCst)
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl LanguageFrontend for StubFrontend {
    type Tree = StubTree;
    type Program = StubProgram;

    fn parse(&self, path: &Path, text: &str) -> StubTree {
        self.parses.fetch_add(1, Ordering::SeqCst);
        let diagnostics = if text.contains('!') {
            vec![Diagnostic::error("stub/bang", "unexpected '!'")]
        } else {
            Vec::new()
        };
        StubTree {
            path: path.to_path_buf(),
            text: text.to_string(),
            diagnostics,
        }
    }

    fn create_program(&self, paths: &[PathBuf], options: &CompilerOptions) -> StubProgram {
        self.builds.fetch_add(1, Ordering::SeqCst);
        let files = paths
            .iter()
            .map(|p| Arc::new(self.parse(p, "")))
            .collect();
        StubProgram {
            roots: paths.to_vec(),
            files,
            options: options.clone(),
        }
    }
}

/// Memory file system that counts stat and read calls.
#[derive(Default)]
pub struct CountingFs {
    pub inner: MemoryFileSystem,
    pub stats: AtomicUsize,
    pub reads: AtomicUsize,
}

impl CountingFs {
    pub fn stat_calls(&self) -> usize {
        self.stats.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl FileSystemProbe for CountingFs {
    fn stat(&self, path: &Path) -> Result<SystemTime> {
        self.stats.fetch_add(1, Ordering::SeqCst);
        self.inner.stat(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_text(path)
    }
}

//! tree-sitter backed language frontend.

use crate::diagnostics::{collect_syntax_diagnostics, NO_TREE};
use crate::language::SourceKind;
use crate::program::Program;
use crate::tree::SourceTree;
use outline_core::{CompilerOptions, Diagnostic, FileSystemProbe, LanguageFrontend, StdFileSystem};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Frontend for TypeScript, TSX, JavaScript and JSX.
///
/// Parsers are created per call; the frontend itself holds no parser state
/// and can be shared freely between threads.
pub struct TypeScriptFrontend {
    fs: Arc<dyn FileSystemProbe>,
}

impl TypeScriptFrontend {
    /// Create a frontend that reads program members through `fs`.
    pub fn new(fs: Arc<dyn FileSystemProbe>) -> Self {
        Self { fs }
    }

    pub(crate) fn file_system(&self) -> &dyn FileSystemProbe {
        self.fs.as_ref()
    }

    /// Parse source text. Never fails: syntax errors are recorded on the tree.
    pub fn parse_source(&self, path: &Path, text: &str) -> SourceTree {
        let kind = SourceKind::from_path(path);
        let mut parser = tree_sitter::Parser::new();

        if let Err(e) = parser.set_language(&kind.grammar()) {
            return unparsed(path, kind, text, format!("Failed to set language: {}", e));
        }

        let Some(tree) = parser.parse(text, None) else {
            return unparsed(path, kind, text, "Parser produced no tree".to_string());
        };

        let diagnostics = collect_syntax_diagnostics(&tree, text, path);
        debug!(
            path = ?path,
            kind = kind.name(),
            diagnostics = diagnostics.len(),
            "Parsed source"
        );

        SourceTree::new(
            path.to_path_buf(),
            kind,
            text.to_string(),
            Some(tree),
            diagnostics,
        )
    }
}

impl Default for TypeScriptFrontend {
    fn default() -> Self {
        Self::new(Arc::new(StdFileSystem))
    }
}

impl LanguageFrontend for TypeScriptFrontend {
    type Tree = SourceTree;
    type Program = Program;

    fn parse(&self, path: &Path, text: &str) -> SourceTree {
        self.parse_source(path, text)
    }

    fn create_program(&self, paths: &[PathBuf], options: &CompilerOptions) -> Program {
        Program::build(self, paths, options)
    }
}

fn unparsed(path: &Path, kind: SourceKind, text: &str, message: String) -> SourceTree {
    SourceTree::new(
        path.to_path_buf(),
        kind,
        text.to_string(),
        None,
        vec![Diagnostic::error(NO_TREE, message)],
    )
}

//! Multi-file programs.

use crate::checker::TypeChecker;
use crate::frontend::TypeScriptFrontend;
use crate::language::SourceKind;
use crate::tree::SourceTree;
use outline_core::{normalize_path, CompilerOptions, Diagnostic, JsxMode, ProgramHandle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const FILE_NOT_FOUND: &str = "program/file-not-found";
pub const READ_FAILED: &str = "program/read-failed";
pub const JS_NOT_ALLOWED: &str = "program/js-not-allowed";
pub const JSX_NOT_ENABLED: &str = "program/jsx-not-enabled";

/// A set of parsed files compiled together under fixed options.
///
/// Building never fails. Members that cannot be read or are excluded by the
/// options leave a program-level diagnostic instead of a tree.
pub struct Program {
    root_names: Vec<PathBuf>,
    options: CompilerOptions,
    files: Vec<Arc<SourceTree>>,
    diagnostics: Vec<Diagnostic>,
    checker: Arc<TypeChecker>,
}

impl Program {
    pub(crate) fn build(
        frontend: &TypeScriptFrontend,
        paths: &[PathBuf],
        options: &CompilerOptions,
    ) -> Self {
        let mut files = Vec::with_capacity(paths.len());
        let mut diagnostics = Vec::new();

        for path in paths {
            let kind = SourceKind::from_path(path);
            if kind.is_javascript() && !options.allow_js {
                diagnostics.push(Diagnostic::error(
                    JS_NOT_ALLOWED,
                    format!(
                        "File '{}' is a JavaScript file; enable allowJs to include it",
                        path.display()
                    ),
                ));
                continue;
            }

            let text = match frontend.file_system().read_text(path) {
                Ok(text) => text,
                Err(e) if e.is_not_found() => {
                    diagnostics.push(Diagnostic::error(
                        FILE_NOT_FOUND,
                        format!("File '{}' not found", path.display()),
                    ));
                    continue;
                }
                Err(e) => {
                    diagnostics.push(Diagnostic::error(READ_FAILED, e.to_string()));
                    continue;
                }
            };

            if kind.has_jsx() && options.jsx == JsxMode::None {
                diagnostics.push(Diagnostic::error(
                    JSX_NOT_ENABLED,
                    format!(
                        "Cannot use JSX in '{}' unless the jsx option is set",
                        path.display()
                    ),
                ));
            }

            files.push(Arc::new(frontend.parse_source(path, &text)));
        }

        debug!(
            roots = paths.len(),
            files = files.len(),
            diagnostics = diagnostics.len(),
            "Program built"
        );

        let checker = Arc::new(TypeChecker::new(files.clone()));
        Self {
            root_names: paths.to_vec(),
            options: options.clone(),
            files,
            diagnostics,
            checker,
        }
    }

    /// Paths the program was asked to compile, in request order.
    pub fn root_names(&self) -> &[PathBuf] {
        &self.root_names
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Diagnostics about the program itself rather than any one file's syntax.
    pub fn program_diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Syntax diagnostics of every member, in member order.
    pub fn syntactic_diagnostics(&self) -> Vec<Diagnostic> {
        self.files
            .iter()
            .flat_map(|f| f.diagnostics().iter().cloned())
            .collect()
    }

    pub fn source_file(&self, path: &Path) -> Option<&Arc<SourceTree>> {
        let wanted = normalize_path(path);
        self.files
            .iter()
            .find(|f| normalize_path(f.path()) == wanted)
    }
}

impl ProgramHandle for Program {
    type Tree = SourceTree;
    type Checker = TypeChecker;

    fn source_files(&self) -> &[Arc<SourceTree>] {
        &self.files
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut all = self.diagnostics.clone();
        all.extend(self.syntactic_diagnostics());
        all
    }

    fn type_checker(&self) -> Arc<TypeChecker> {
        self.checker.clone()
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("root_names", &self.root_names)
            .field("files", &self.files.len())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

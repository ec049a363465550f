//! Interfaces to the language frontend.
//!
//! Grammar and type-system semantics live entirely behind these traits; the
//! caches only see opaque trees and programs.

use crate::config::CompilerOptions;
use crate::diagnostic::Diagnostic;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A parsed file. Immutable once built: new content means a new tree.
pub trait SyntaxTree: Send + Sync {
    /// Path the tree was parsed from.
    fn path(&self) -> &Path;

    /// Syntax diagnostics found while parsing.
    fn diagnostics(&self) -> &[Diagnostic];
}

/// A compiled unit over an ordered set of files.
pub trait ProgramHandle: Send + Sync {
    type Tree: SyntaxTree;
    type Checker: Send + Sync;

    /// Member trees in root order. Files that could not be read are absent.
    fn source_files(&self) -> &[Arc<Self::Tree>];

    /// Program-level diagnostics followed by every member's syntax diagnostics.
    fn diagnostics(&self) -> Vec<Diagnostic>;

    /// Query surface over the program.
    fn type_checker(&self) -> Arc<Self::Checker>;
}

/// Parser and program builder for one language family.
pub trait LanguageFrontend: Send + Sync {
    type Tree: SyntaxTree;
    type Program: ProgramHandle<Tree = Self::Tree>;

    /// Parse `text` as the contents of `path`. Syntax problems are recorded
    /// on the returned tree, never raised.
    fn parse(&self, path: &Path, text: &str) -> Self::Tree;

    /// Build a program over `paths`. Missing or broken members yield
    /// diagnostics on a best-effort handle rather than a failure.
    fn create_program(&self, paths: &[PathBuf], options: &CompilerOptions) -> Self::Program;
}

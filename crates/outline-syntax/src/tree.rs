//! Parsed source files.

use crate::language::SourceKind;
use outline_core::{Diagnostic, Location, Position, SyntaxTree};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Point};

/// One file's text and its concrete syntax tree.
///
/// A tree is never mutated after parsing; new content produces a new
/// `SourceTree`.
pub struct SourceTree {
    path: PathBuf,
    kind: SourceKind,
    text: String,
    tree: Option<tree_sitter::Tree>,
    diagnostics: Vec<Diagnostic>,
}

impl SourceTree {
    pub(crate) fn new(
        path: PathBuf,
        kind: SourceKind,
        text: String,
        tree: Option<tree_sitter::Tree>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            path,
            kind,
            text,
            tree,
            diagnostics,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Root of the syntax tree, absent only when the parser produced nothing.
    pub fn root_node(&self) -> Option<Node<'_>> {
        self.tree.as_ref().map(|t| t.root_node())
    }

    /// Source text covered by `node`.
    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.text
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("")
    }

    pub fn location_of(&self, node: Node<'_>) -> Location {
        node_location(&self.path, node)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

impl SyntaxTree for SourceTree {
    fn path(&self) -> &Path {
        &self.path
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl std::fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTree")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("bytes", &self.text.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

fn position(point: Point, offset: usize) -> Position {
    Position::new(point.row + 1, point.column + 1, offset)
}

/// Location of `node` inside the file at `path`.
pub(crate) fn node_location(path: &Path, node: Node<'_>) -> Location {
    Location {
        file: path.to_path_buf(),
        start: position(node.start_position(), node.start_byte()),
        end: position(node.end_position(), node.end_byte()),
    }
}

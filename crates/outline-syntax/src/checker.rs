//! Query surface over a program's trees.
//!
//! This is purely syntactic: it answers "what is at this position" without
//! resolving symbols or inferring types.

use crate::tree::SourceTree;
use outline_core::{normalize_path, Location};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// The smallest named syntax node covering a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDescription {
    pub kind: &'static str,
    pub text: String,
    pub location: Location,
}

pub struct TypeChecker {
    files: Vec<Arc<SourceTree>>,
}

impl TypeChecker {
    pub(crate) fn new(files: Vec<Arc<SourceTree>>) -> Self {
        Self { files }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn source_file(&self, path: &Path) -> Option<&Arc<SourceTree>> {
        let wanted = normalize_path(path);
        self.files
            .iter()
            .find(|f| normalize_path(f.path()) == wanted)
    }

    /// Describe the node at byte `offset` in `path`.
    pub fn node_at(&self, path: &Path, offset: usize) -> Option<NodeDescription> {
        let tree = self.source_file(path)?;
        if offset > tree.text().len() {
            return None;
        }
        let node = tree
            .root_node()?
            .named_descendant_for_byte_range(offset, offset)?;

        Some(NodeDescription {
            kind: node.kind(),
            text: tree.node_text(node).to_string(),
            location: tree.location_of(node),
        })
    }
}

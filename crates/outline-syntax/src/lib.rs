//! Outline Syntax
//!
//! The tree-sitter frontend behind Outline's caches:
//! - Dialect detection for TypeScript, TSX, JavaScript and JSX
//! - Parsing into immutable `SourceTree`s with recovered syntax diagnostics
//! - Best-effort multi-file `Program`s and a syntactic `TypeChecker`

mod checker;
pub mod diagnostics;
mod frontend;
mod language;
pub mod program;
mod tree;

pub use checker::{NodeDescription, TypeChecker};
pub use frontend::TypeScriptFrontend;
pub use language::SourceKind;
pub use program::Program;
pub use tree::SourceTree;

/// Re-exported so callers can walk `SourceTree` nodes without a direct
/// tree-sitter dependency.
pub use tree_sitter::Node;

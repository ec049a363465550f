//! Syntax diagnostics recovered from tree-sitter error nodes.

use crate::tree::node_location;
use outline_core::Diagnostic;
use std::path::Path;
use tree_sitter::{Node, Tree};

pub const UNEXPECTED_TOKEN: &str = "syntax/unexpected-token";
pub const MISSING_TOKEN: &str = "syntax/missing-token";
pub const INVALID_SYNTAX: &str = "syntax/invalid";
pub const NO_TREE: &str = "syntax/no-tree";

const SNIPPET_CHARS: usize = 30;

/// Collect one diagnostic per `ERROR` or `MISSING` node, in document order.
///
/// Walks with an explicit stack and skips subtrees tree-sitter has marked
/// error-free, so clean files cost one check on the root.
pub(crate) fn collect_syntax_diagnostics(tree: &Tree, text: &str, path: &Path) -> Vec<Diagnostic> {
    let root = tree.root_node();
    if !root.has_error() {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() {
            diagnostics.push(missing_token(node, path));
            continue;
        }
        if node.is_error() {
            diagnostics.push(unexpected_token(node, text, path));
            continue;
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    if diagnostics.is_empty() {
        diagnostics.push(
            Diagnostic::error(INVALID_SYNTAX, "Invalid syntax").with_location(node_location(path, root)),
        );
    }
    diagnostics
}

fn missing_token(node: Node<'_>, path: &Path) -> Diagnostic {
    Diagnostic::error(MISSING_TOKEN, format!("'{}' expected", node.kind()))
        .with_location(node_location(path, node))
}

fn unexpected_token(node: Node<'_>, text: &str, path: &Path) -> Diagnostic {
    let covered = text.get(node.start_byte()..node.end_byte()).unwrap_or("");
    let message = match snippet(covered) {
        Some(s) => format!("Unexpected '{}'", s),
        None => "Unexpected token".to_string(),
    };
    Diagnostic::error(UNEXPECTED_TOKEN, message).with_location(node_location(path, node))
}

/// First line of `covered`, trimmed and capped at a few dozen characters.
fn snippet(covered: &str) -> Option<String> {
    let line = covered.lines().map(str::trim).find(|l| !l.is_empty())?;
    let mut out: String = line.chars().take(SNIPPET_CHARS).collect();
    if line.chars().count() > SNIPPET_CHARS {
        out.push_str("...");
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SourceKind;
    use outline_core::DiagnosticCategory;

    fn parse(text: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&SourceKind::TypeScript.grammar()).unwrap();
        parser.parse(text, None).unwrap()
    }

    #[test]
    fn test_clean_source_has_no_diagnostics() {
        let text = "function ok(a: number): number { return a; }\n";
        let diags = collect_syntax_diagnostics(&parse(text), text, Path::new("/a.ts"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_unterminated_function() {
        let text = "function broken() { // unterminated";
        let diags = collect_syntax_diagnostics(&parse(text), text, Path::new("/a.ts"));

        assert!(!diags.is_empty());
        assert_eq!(diags[0].category, DiagnosticCategory::Error);
        assert!(diags[0].location.is_some());
    }

    #[test]
    fn test_garbage_reports_unexpected() {
        let text = "let x = ;;; @@@ }}}\n";
        let diags = collect_syntax_diagnostics(&parse(text), text, Path::new("/a.ts"));

        assert!(!diags.is_empty());
        assert!(diags.iter().all(|d| d.is_error()));
        assert!(diags
            .iter()
            .all(|d| d.code == UNEXPECTED_TOKEN || d.code == MISSING_TOKEN));
    }

    #[test]
    fn test_diagnostics_in_document_order() {
        let text = "function a( {}\nclass B { x = ; }\nfunction c() {}\nfunction d( {}\n";
        let diags = collect_syntax_diagnostics(&parse(text), text, Path::new("/a.ts"));

        let offsets: Vec<usize> = diags
            .iter()
            .map(|d| d.location.as_ref().unwrap().start.offset)
            .collect();
        let mut sorted = offsets.clone();
        sorted.sort();
        assert_eq!(offsets, sorted);
    }

    #[test]
    fn test_snippet_truncation() {
        assert_eq!(snippet("   \n  foo bar  \n"), Some("foo bar".to_string()));
        assert_eq!(snippet(""), None);
        let long = "x".repeat(50);
        assert_eq!(snippet(&long).unwrap(), format!("{}...", "x".repeat(30)));
    }
}

//! Function and class extraction.
//!
//! Walks a parsed tree once, pre-order, collecting named function and class
//! declarations at any depth. Arrow functions, function expressions bound to
//! variables and class members are not reported.

use crate::error::{AnalyzeError, Result};
use crate::model::{ClassInfo, FunctionInfo, ParseError, StructureAnalysisResult};
use outline_core::DiagnosticCategory;
use outline_syntax::{Node, SourceTree};
use tracing::debug;

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_signature",
];

const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration"];

/// Anonymous forms that only count when they are the value of `export default`.
const DEFAULT_FUNCTION_KINDS: &[&str] = &["function_expression", "function", "generator_function"];
const DEFAULT_CLASS_KINDS: &[&str] = &["class"];

/// Name reported for anonymous default exports.
pub const DEFAULT_EXPORT_NAME: &str = "default";

/// How a node relates to an enclosing export statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportContext {
    None,
    Named,
    Default,
}

impl ExportContext {
    fn exported(self) -> bool {
        self != ExportContext::None
    }
}

/// Analyze a tree, or fail if none was supplied.
pub fn try_analyze(tree: Option<&SourceTree>) -> Result<StructureAnalysisResult> {
    tree.map(analyze).ok_or(AnalyzeError::MissingTree)
}

/// Extract declarations and diagnostics from a parsed tree.
///
/// Never fails: syntax problems become entries in `errors` and clear
/// `success`, while declarations that were still recognised are returned.
pub fn analyze(tree: &SourceTree) -> StructureAnalysisResult {
    let mut functions = Vec::new();
    let mut classes = Vec::new();

    if let Some(root) = tree.root_node() {
        // Explicit stack so deeply nested input cannot overflow the call stack
        let mut stack: Vec<(Node<'_>, ExportContext)> = vec![(root, ExportContext::None)];

        while let Some((node, context)) = stack.pop() {
            let kind = node.kind();

            if FUNCTION_KINDS.contains(&kind) {
                if let Some(name) = declared_name(tree, node) {
                    functions.push(FunctionInfo {
                        name,
                        location: tree.location_of(node),
                        exported: context.exported(),
                    });
                }
            } else if CLASS_KINDS.contains(&kind) {
                if let Some(name) = declared_name(tree, node) {
                    classes.push(ClassInfo {
                        name,
                        location: tree.location_of(node),
                        exported: context.exported(),
                    });
                }
            } else if context == ExportContext::Default && DEFAULT_FUNCTION_KINDS.contains(&kind) {
                functions.push(FunctionInfo {
                    name: default_name(tree, node),
                    location: tree.location_of(node),
                    exported: true,
                });
            } else if context == ExportContext::Default && DEFAULT_CLASS_KINDS.contains(&kind) {
                classes.push(ClassInfo {
                    name: default_name(tree, node),
                    location: tree.location_of(node),
                    exported: true,
                });
            }

            push_children(&mut stack, node, context);
        }
    }

    let errors: Vec<ParseError> = tree.diagnostics().iter().map(ParseError::from).collect();
    let success = !errors
        .iter()
        .any(|e| e.severity == DiagnosticCategory::Error);

    debug!(
        path = %tree.path().display(),
        functions = functions.len(),
        classes = classes.len(),
        errors = errors.len(),
        "Structure analyzed"
    );

    StructureAnalysisResult {
        file_path: tree.path().to_path_buf(),
        timestamp: chrono::Utc::now().timestamp_millis(),
        success,
        functions,
        classes,
        errors: if errors.is_empty() { None } else { Some(errors) },
    }
}

/// Push children in reverse so they pop in source order.
fn push_children<'t>(
    stack: &mut Vec<(Node<'t>, ExportContext)>,
    node: Node<'t>,
    context: ExportContext,
) {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();

    match node.kind() {
        "export_statement" => {
            let declaration = node.child_by_field_name("declaration").map(|n| n.id());
            let value = node.child_by_field_name("value").map(|n| n.id());
            let is_default = children.iter().any(|c| c.kind() == "default");

            for child in children.into_iter().rev() {
                let child_context = if Some(child.id()) == declaration {
                    ExportContext::Named
                } else if is_default && Some(child.id()) == value {
                    ExportContext::Default
                } else {
                    ExportContext::None
                };
                stack.push((child, child_context));
            }
        }
        // `export declare function f(): void;` exports the wrapped signature
        "ambient_declaration" if context == ExportContext::Named => {
            for child in children.into_iter().rev() {
                stack.push((child, ExportContext::Named));
            }
        }
        _ => {
            for child in children.into_iter().rev() {
                stack.push((child, ExportContext::None));
            }
        }
    }
}

fn declared_name(tree: &SourceTree, node: Node<'_>) -> Option<String> {
    let name = node.child_by_field_name("name")?;
    Some(tree.node_text(name).to_string())
}

fn default_name(tree: &SourceTree, node: Node<'_>) -> String {
    declared_name(tree, node).unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_string())
}

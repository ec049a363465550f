//! Source dialect detection.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dialects of the TypeScript family the frontend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
}

impl SourceKind {
    /// Detect the dialect from a file extension. Unknown extensions are
    /// treated as TypeScript.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            // covers `.d.ts` too
            "ts" | "mts" | "cts" => SourceKind::TypeScript,
            "tsx" => SourceKind::Tsx,
            "js" | "mjs" | "cjs" => SourceKind::JavaScript,
            "jsx" => SourceKind::Jsx,
            _ => SourceKind::TypeScript,
        }
    }

    /// Get the display name for this dialect.
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::TypeScript => "TypeScript",
            SourceKind::Tsx => "TSX",
            SourceKind::JavaScript => "JavaScript",
            SourceKind::Jsx => "JSX",
        }
    }

    pub fn is_javascript(&self) -> bool {
        matches!(self, SourceKind::JavaScript | SourceKind::Jsx)
    }

    /// Whether files of this dialect are expected to contain JSX.
    pub fn has_jsx(&self) -> bool {
        matches!(self, SourceKind::Tsx | SourceKind::Jsx)
    }

    /// Grammar used to parse this dialect. Plain JavaScript goes through
    /// the TSX grammar since `.js` files commonly carry JSX.
    pub(crate) fn grammar(&self) -> tree_sitter::Language {
        match self {
            SourceKind::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceKind::Tsx | SourceKind::JavaScript | SourceKind::Jsx => {
                tree_sitter_typescript::LANGUAGE_TSX.into()
            }
        }
    }
}

//! Result types produced by the structure analyzer.

use outline_core::{Diagnostic, DiagnosticCategory, Location};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    pub location: Location,
    pub exported: bool,
}

/// A named class declaration. Members are not extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    pub location: Location,
    pub exported: bool,
}

/// A diagnostic as reported in analysis results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub code: String,
    pub message: String,
    pub severity: DiagnosticCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl From<&Diagnostic> for ParseError {
    fn from(d: &Diagnostic) -> Self {
        Self {
            code: d.code.clone(),
            message: d.message.clone(),
            severity: d.category,
            location: d.location.clone(),
        }
    }
}

/// Declarations and diagnostics found in one file.
///
/// Built fresh on every analysis; nothing here is cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysisResult {
    pub file_path: PathBuf,
    /// Unix milliseconds when the analysis ran
    pub timestamp: i64,
    /// False iff at least one error-severity diagnostic was collected
    pub success: bool,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ParseError>>,
}

impl StructureAnalysisResult {
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn errors(&self) -> &[ParseError] {
        self.errors.as_deref().unwrap_or(&[])
    }
}

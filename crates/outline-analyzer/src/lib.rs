//! Outline Analyzer
//!
//! Extracts named functions and classes from parsed TypeScript and
//! JavaScript sources, and wires the caches into a [`Workspace`].

pub mod error;
mod model;
pub mod structure;
mod workspace;

pub use error::{AnalyzeError, Result};
pub use model::{ClassInfo, FunctionInfo, ParseError, StructureAnalysisResult};
pub use structure::{analyze, try_analyze, DEFAULT_EXPORT_NAME};
pub use workspace::Workspace;

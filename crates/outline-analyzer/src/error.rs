//! Error types for structure analysis.

use thiserror::Error;

/// Errors that can occur during analysis.
///
/// Syntax problems in the analysed file are not errors; they are reported
/// inside the result.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// No tree was supplied
    #[error("a tree is required")]
    MissingTree,

    /// The file could not be stat'd or read
    #[error(transparent)]
    Core(#[from] outline_core::CoreError),
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;

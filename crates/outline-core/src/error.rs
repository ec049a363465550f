//! Core error types for Outline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in core operations.
///
/// Syntax problems in analysed sources are never reported through this type;
/// they travel as [`crate::Diagnostic`] data alongside partial results.
#[derive(Debug, Error)]
pub enum CoreError {
    /// File does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File exists but could not be stat'd or read
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required collaborator was not supplied at construction
    #[error("Missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            CoreError::NotFound(path)
        } else {
            CoreError::Io { path, source }
        }
    }

    /// Whether this error means the file is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(e: serde_yaml::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

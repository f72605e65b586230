//! Error types for order sources.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a snapshot.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    /// The snapshot could not be read.
    #[error("Failed to read '{}': {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The snapshot is not a JSON array of rows.
    #[error("Failed to parse snapshot: {0}")]
    Parse(String),

    /// The upstream collaborator reported a failure.
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

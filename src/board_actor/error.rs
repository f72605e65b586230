//! Error types for the board actor.

use thiserror::Error;

use crate::source::SourceError;

/// Errors returned to [`BoardClient`](crate::clients::BoardClient) callers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BoardError {
    /// The actor has stopped and no longer accepts requests.
    #[error("Board actor closed")]
    ActorClosed,

    /// The actor dropped the response channel before answering.
    #[error("Board actor dropped response channel")]
    ActorDropped,

    /// Fetching the snapshot failed.
    #[error("Refresh failed: {0}")]
    Source(#[from] SourceError),
}

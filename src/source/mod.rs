//! Order sources: where snapshot rows come from.
//!
//! The board only needs one thing from upstream: "give me the current rows of
//! the logistics view". [`OrderSource`] is that seam. [`JsonFileSource`] reads an
//! exported snapshot; [`mock::MockSource`] scripts responses for tests.

pub mod error;
pub mod mock;

pub use error::*;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::domain::OrderRow;

/// Supplier of raw order rows.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetches the full current snapshot.
    async fn fetch(&self) -> Result<Vec<OrderRow>, SourceError>;
}

/// Reads a JSON array of row objects from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OrderSource for JsonFileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Vec<OrderRow>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io { path: self.path.clone(), message: e.to_string() })?;
        parse_rows(&content)
    }
}

/// Parses a JSON array of rows.
///
/// Elements that are not objects are skipped with a warning; one bad element
/// never costs the rest of the snapshot.
pub fn parse_rows(content: &str) -> Result<Vec<OrderRow>, SourceError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(|e| SourceError::Parse(e.to_string()))?;

    let mut rows = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        if !value.is_object() {
            warn!(index, "Skipping non-object row");
            continue;
        }
        match serde_json::from_value::<OrderRow>(value) {
            Ok(row) => rows.push(row),
            Err(e) => warn!(index, error = %e, "Skipping unreadable row"),
        }
    }
    debug!(rows = rows.len(), "Parsed snapshot");
    Ok(rows)
}

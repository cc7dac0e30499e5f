//! Error types for the record store.
//!
//! Only conditions that block the whole invocation are surfaced as errors.
//! Per-file problems are recorded in a [`super::LoadReport`] instead.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data root does not exist; data needs to be provisioned first.
    #[error("Data directory not found: {}", .0.display())]
    DataRootMissing(PathBuf),

    /// The data root exists but is not a directory.
    #[error("Data path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// IO error for file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Cache file could not be used or written.
    #[error("Cache error: {0}")]
    Cache(String),
}

impl StoreError {
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// True when the caller should run its data-provisioning flow.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Self::DataRootMissing(_))
    }
}

/// Result type alias for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

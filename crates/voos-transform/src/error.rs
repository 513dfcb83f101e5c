//! Error types for frame conversion and export.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while building frames or writing exports.
///
/// Filtering, aggregation and the report views never fail; only the steps
/// that go through polars or the file system return these.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Polars rejected a frame operation.
    #[error("frame error: {0}")]
    Frame(#[from] PolarsError),

    /// The export file could not be created.
    #[error("failed to create {path}: {source}")]
    ExportCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the export failed after the file was created.
    #[error("failed to write {path}: {message}")]
    ExportWrite { path: PathBuf, message: String },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

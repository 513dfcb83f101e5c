//! Error types for flight-log ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during ingestion.
///
/// Per-file variants are recoverable: the merger and the batch normalizer
/// drop that file's contribution and continue. [`IngestError::NoSourceFiles`]
/// and [`IngestError::InvalidPattern`] are configuration errors and stop
/// dataset initialization.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Configuration Errors ===
    /// The discovery pattern matched no file.
    #[error("no source files match {pattern}")]
    NoSourceFiles { pattern: String },

    /// The discovery pattern is not a valid glob.
    #[error("invalid file pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a normalized file.
    #[error("failed to write file {path}: {message}")]
    FileWrite { path: PathBuf, message: String },

    // === Decoding and Parsing Errors ===
    /// File bytes are not valid in the configured encoding.
    #[error("{path} is not valid {encoding} text")]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    /// CSV structure could not be parsed.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A data row has more cells than the header (usually a wrong delimiter).
    #[error("{path}: row {row} has {found} fields but the header has {expected}")]
    RowTooLong {
        path: PathBuf,
        row: usize,
        found: usize,
        expected: usize,
    },

    /// File has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// No candidate delimiter appears in the sample.
    #[error("could not detect a delimiter in {path}")]
    DelimiterNotDetected { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/voos_2021.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /data/voos_2021.csv");
    }

    #[test]
    fn test_row_too_long_display() {
        let err = IngestError::RowTooLong {
            path: PathBuf::from("voos.csv"),
            row: 3,
            found: 5,
            expected: 2,
        };
        assert_eq!(
            err.to_string(),
            "voos.csv: row 3 has 5 fields but the header has 2"
        );
    }
}

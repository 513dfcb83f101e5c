//! Flight-log ingestion.
//!
//! This crate turns the yearly flight-log exports into one canonical
//! passenger-grain dataset.
//!
//! # Features
//!
//! - **Discovery**: find source files by glob pattern, in sorted order
//! - **Decoding**: read Latin-1 or UTF-8 files with an explicit delimiter
//! - **Normalization**: rename variant headers onto the canonical schema and
//!   derive `Ano` from `Data`
//! - **Merging**: concatenate per-file rows, recording unreadable files
//! - **Batch normalization**: write normalized UTF-8 comma-separated files
//! - **Sniffing**: detect the delimiter and encoding of an unknown file
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use voos_ingest::{SourceFormat, load_merged, normalize_sources};
//!
//! // Raw yearly exports are semicolon-separated Latin-1.
//! normalize_sources("data/voos_*.csv", Path::new("data/normalized"), &SourceFormat::raw())?;
//!
//! // The report is served from the normalized files.
//! let merged = load_merged("data/normalized/voos_*.csv", &SourceFormat::normalized())?;
//! println!("{} rows from {} files", merged.records.len(), merged.report.loaded.len());
//! ```

mod csv;
mod discovery;
mod error;
mod format;
mod merge;
mod normalize;
mod sniff;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Format Configuration ===
pub use format::{
    DEFAULT_NORMALIZED_PATTERN, DEFAULT_OUTPUT_DIR, DEFAULT_RAW_PATTERN, SourceFormat,
    TextEncoding,
};

// === CSV Reading ===
pub use self::csv::{RawRecord, RawTable, decode_bytes, parse_raw_table, read_raw_table};

// === File Discovery ===
pub use discovery::{discover_sources, list_csv_files};

// === Normalization ===
pub use normalize::{ColumnPlan, NormalizedFile, normalize_file, normalize_table};

// === Merging ===
pub use merge::{
    FailedFile, FileOutcome, LoadReport, LoadedFile, MergedDataset, load_merged, merge_files,
};

// === Output ===
pub use writer::{
    NormalizeReport, NormalizedOutput, normalize_sources, write_normalized, write_records,
};

// === Format Detection ===
pub use sniff::{CANDIDATE_DELIMITERS, SNIFF_SAMPLE_BYTES, SniffReport, sniff_bytes, sniff_file};

//! Dataset merging: per-file normalized rows into one canonical dataset.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, info_span, warn};

use voos_model::{FlightLogRecord, canonical_column_name};

use crate::csv::read_raw_table;
use crate::discovery::discover_sources;
use crate::error::{IngestError, Result};
use crate::format::SourceFormat;
use crate::normalize::{NormalizedFile, normalize_loaded};

/// A file that contributed rows to the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub rows: usize,
}

/// A file whose contribution was dropped.
#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: IngestError,
}

/// Outcome of reading one discovered file.
pub type FileOutcome = std::result::Result<NormalizedFile, FailedFile>;

/// Per-file accounting of a merge, in discovery order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<LoadedFile>,
    pub failed: Vec<FailedFile>,
}

impl LoadReport {
    pub fn total_rows(&self) -> usize {
        self.loaded.iter().map(|file| file.rows).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Canonical rows of every readable file plus the load report.
#[derive(Debug, Default)]
pub struct MergedDataset {
    pub records: Vec<FlightLogRecord>,
    pub report: LoadReport,
}

/// Concatenates per-file outputs in the order given.
///
/// Failed files contribute nothing and are listed in the report. There is
/// no cross-file deduplication.
pub fn merge_files<I>(outcomes: I) -> MergedDataset
where
    I: IntoIterator<Item = FileOutcome>,
{
    let mut merged = MergedDataset::default();
    for outcome in outcomes {
        match outcome {
            Ok(file) => {
                merged.report.loaded.push(LoadedFile {
                    path: file.path,
                    rows: file.records.len(),
                });
                merged.records.extend(file.records);
            }
            Err(failed) => {
                warn!(
                    path = %failed.path.display(),
                    error = %failed.error,
                    "skipping unreadable source file"
                );
                merged.report.failed.push(failed);
            }
        }
    }
    merged
}

/// Discovers normalized files and merges them into one dataset.
///
/// # Errors
///
/// Returns [`IngestError::NoSourceFiles`] when the pattern matches nothing,
/// so that a report is never served from an empty dataset of unknown cause.
/// Per-file failures are not errors; they are listed in the report.
pub fn load_merged(pattern: &str, format: &SourceFormat) -> Result<MergedDataset> {
    let span = info_span!("load", pattern = %pattern);
    let _guard = span.enter();
    let start = Instant::now();

    let files = discover_sources(pattern)?;
    if files.is_empty() {
        return Err(IngestError::NoSourceFiles {
            pattern: pattern.to_string(),
        });
    }

    let merged = merge_files(files.iter().map(|path| load_one(path, format)));
    info!(
        files = merged.report.loaded.len(),
        failed = merged.report.failed.len(),
        rows = merged.records.len(),
        duration_ms = start.elapsed().as_millis(),
        "dataset merged"
    );
    Ok(merged)
}

fn load_one(path: &Path, format: &SourceFormat) -> FileOutcome {
    let mut table = read_raw_table(path, format).map_err(|error| FailedFile {
        path: path.to_path_buf(),
        error,
    })?;
    // Column names are re-normalized here independently of the normalizer.
    for header in &mut table.headers {
        *header = canonical_column_name(header);
    }
    Ok(normalize_loaded(path, &table))
}

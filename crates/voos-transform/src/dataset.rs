//! The canonical dataset and its shared handle.
//!
//! A [`Dataset`] is immutable once built. Readers take an `Arc` snapshot
//! from the [`DatasetHandle`] and work on it without holding the lock; a
//! reload builds a new dataset and swaps it in with a single write.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use voos_model::FlightLogRecord;

/// Provenance of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetMeta {
    /// Files whose rows are in the dataset, in merge order.
    pub source_files: Vec<PathBuf>,
    /// Files that were discovered but could not be read.
    pub failed_files: Vec<PathBuf>,
}

/// Passenger-grain rows merged from every readable source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<FlightLogRecord>,
    meta: DatasetMeta,
}

impl Dataset {
    pub fn new(records: Vec<FlightLogRecord>) -> Self {
        Self {
            records,
            meta: DatasetMeta::default(),
        }
    }

    pub fn with_meta(records: Vec<FlightLogRecord>, meta: DatasetMeta) -> Self {
        Self { records, meta }
    }

    pub fn records(&self) -> &[FlightLogRecord] {
        &self.records
    }

    /// Returns the number of passenger rows.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source_files(&self) -> &[PathBuf] {
        &self.meta.source_files
    }

    pub fn failed_files(&self) -> &[PathBuf] {
        &self.meta.failed_files
    }
}

/// Shared, swappable reference to the current dataset.
#[derive(Debug, Default)]
pub struct DatasetHandle {
    current: RwLock<Arc<Dataset>>,
}

impl DatasetHandle {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    /// Returns the dataset as of now. Later reloads do not affect it.
    pub fn snapshot(&self) -> Arc<Dataset> {
        // The guarded value is a single Arc, so a poisoned lock still holds
        // a complete dataset.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Installs a new dataset and returns the one it replaced.
    pub fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let next = Arc::new(dataset);
        info!(
            rows = next.record_count(),
            files = next.source_files().len(),
            "dataset replaced"
        );
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voos_model::Field;

    fn record(data: &str) -> FlightLogRecord {
        FlightLogRecord::from_fields([(Field::Data, data)])
    }

    #[test]
    fn snapshot_survives_replace() {
        let handle = DatasetHandle::new(Dataset::new(vec![record("01/01/2020")]));
        let before = handle.snapshot();

        let previous = handle.replace(Dataset::new(vec![
            record("01/01/2021"),
            record("02/01/2021"),
        ]));

        assert_eq!(before.record_count(), 1);
        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(handle.snapshot().record_count(), 2);
    }

    #[test]
    fn default_handle_is_empty() {
        let handle = DatasetHandle::default();
        assert!(handle.snapshot().is_empty());
    }

    #[test]
    fn meta_is_exposed() {
        let dataset = Dataset::with_meta(
            Vec::new(),
            DatasetMeta {
                source_files: vec![PathBuf::from("voos_2020.csv")],
                failed_files: vec![PathBuf::from("voos_2021.csv")],
            },
        );
        assert_eq!(dataset.source_files(), [PathBuf::from("voos_2020.csv")]);
        assert_eq!(dataset.failed_files().len(), 1);
    }
}

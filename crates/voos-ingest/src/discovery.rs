//! Source file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// Finds every file matching a glob pattern (e.g. `data/normalized/voos_*.csv`).
///
/// Returns regular files only, sorted by path so that merge order is
/// deterministic. An empty result is not an error here; callers decide
/// whether that is fatal.
pub fn discover_sources(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| IngestError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => {
                debug!(path = %e.path().display(), error = %e.error(), "skipping unreadable path");
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        // Check for .csv extension (case-insensitive)
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &["voos_2022.csv", "voos_2020.csv", "voos_2021.CSV", "README.md"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "Data\n01/01/2020").unwrap();
        }
        std::fs::create_dir(dir.path().join("voos_dir.csv")).unwrap();

        dir
    }

    #[test]
    fn test_discover_sources_sorted() {
        let dir = create_test_dir();
        let pattern = dir.path().join("voos_*.csv").display().to_string();
        let files = discover_sources(&pattern).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        // Directories never count as sources; glob matching is case-sensitive.
        assert_eq!(names, vec!["voos_2020.csv", "voos_2022.csv"]);
    }

    #[test]
    fn test_discover_sources_no_match() {
        let dir = TempDir::new().unwrap();
        let pattern = dir.path().join("voos_*.csv").display().to_string();
        assert!(discover_sources(&pattern).unwrap().is_empty());
    }

    #[test]
    fn test_discover_sources_invalid_pattern() {
        let result = discover_sources("data/[voos.csv");
        assert!(matches!(result, Err(IngestError::InvalidPattern { .. })));
    }

    #[test]
    fn test_list_csv_files() {
        let dir = create_test_dir();
        let files = list_csv_files(dir.path()).unwrap();

        assert_eq!(files.len(), 3);
        assert!(
            files[0]
                .file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .contains("2020")
        );
    }

    #[test]
    fn test_list_csv_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("voos.csv");
        std::fs::write(&file_path, "data").unwrap();

        let result = list_csv_files(&file_path);
        assert!(result.is_err());
    }
}

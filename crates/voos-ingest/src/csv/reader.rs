//! Delimited-text reading into an untyped table.

use std::collections::BTreeMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{IngestError, Result};
use crate::format::SourceFormat;

use super::decode::decode_bytes;

/// One source row keyed by its raw header text.
pub type RawRecord = BTreeMap<String, String>;

/// A source file as read: raw header cells and rows padded to header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns one row as a header -> value mapping.
    ///
    /// Duplicate headers keep the first column's value.
    pub fn record(&self, idx: usize) -> Option<RawRecord> {
        let row = self.rows.get(idx)?;
        let mut record = RawRecord::new();
        for (header, value) in self.headers.iter().zip(row) {
            record
                .entry(header.clone())
                .or_insert_with(|| value.clone());
        }
        Some(record)
    }
}

/// Reads a file with the configured delimiter and encoding.
pub fn read_raw_table(path: &Path, format: &SourceFormat) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let text = decode_bytes(path, &bytes, format.encoding)?;
    parse_raw_table(path, &text, format.delimiter)
}

/// Parses already-decoded text. The first non-empty line is the header.
///
/// Rows shorter than the header are padded with empty cells. Extra trailing
/// cells are accepted only when empty; otherwise the row is a structural
/// mismatch, which almost always means the delimiter is wrong.
pub fn parse_raw_table(path: &Path, text: &str, delimiter: u8) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => {
            let record = record.map_err(|e| csv_error(path, &e))?;
            record.iter().map(str::to_string).collect()
        }
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    if headers.iter().all(|header| header.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| csv_error(path, &e))?;
        rows.push(fit_row(path, &record, headers.len())?);
    }
    Ok(RawTable { headers, rows })
}

fn fit_row(path: &Path, record: &StringRecord, width: usize) -> Result<Vec<String>> {
    if record.len() > width && record.iter().skip(width).any(|cell| !cell.is_empty()) {
        return Err(IngestError::RowTooLong {
            path: path.to_path_buf(),
            row: record
                .position()
                .map_or(0, |position| position.line() as usize),
            found: record.len(),
            expected: width,
        });
    }
    let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
    row.resize(width, String::new());
    Ok(row)
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TextEncoding;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_latin1_semicolon_file() {
        let file = create_temp_file(b"Data;\xd3rg\xe3o\n15/03/2022;SEF\n");
        let table = read_raw_table(file.path(), &SourceFormat::raw()).unwrap();

        assert_eq!(table.headers, vec!["Data", "Órgão"]);
        assert_eq!(table.rows, vec![vec!["15/03/2022", "SEF"]]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse_raw_table(Path::new("x.csv"), "A,B,C\n1,2\n", b',').unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2", ""]]);
    }

    #[test]
    fn test_empty_trailing_cells_are_tolerated() {
        let table = parse_raw_table(Path::new("x.csv"), "A;B\n1;2;\n", b';').unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let result = parse_raw_table(Path::new("x.csv"), "A;B\n1;2;3\n", b';');
        assert!(matches!(
            result,
            Err(IngestError::RowTooLong {
                found: 3,
                expected: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_delimiter_only_rows_are_kept() {
        let table = parse_raw_table(Path::new("x.csv"), "A;B\n;\n1;2\n\n", b';').unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], vec![String::new(), String::new()]);
        assert_eq!(table.rows[1], vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let table = parse_raw_table(Path::new("x.csv"), "A;B\n 1 ;x\n", b';').unwrap();
        assert_eq!(table.rows[0][0], " 1 ");
    }

    #[test]
    fn test_empty_file() {
        let result = parse_raw_table(Path::new("x.csv"), "", b',');
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_file() {
        let format = SourceFormat::new(b',', TextEncoding::Utf8);
        let result = read_raw_table(Path::new("/nonexistent/voos.csv"), &format);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_record_mapping_keeps_first_duplicate() {
        let table = parse_raw_table(Path::new("x.csv"), "A;A;B\n1;2;3\n", b';').unwrap();
        let record = table.record(0).unwrap();
        assert_eq!(record.get("A").map(String::as_str), Some("1"));
        assert_eq!(record.get("B").map(String::as_str), Some("3"));
        assert!(table.record(1).is_none());
    }
}

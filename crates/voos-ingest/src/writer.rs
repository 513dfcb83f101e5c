//! Normalized-file output and the batch normalizer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::{info, info_span, warn};

use voos_model::{Field, FlightLogRecord};

use crate::discovery::discover_sources;
use crate::error::{IngestError, Result};
use crate::format::SourceFormat;
use crate::merge::FailedFile;
use crate::normalize::normalize_file;

/// Writes records as comma-delimited UTF-8 with the canonical header row.
///
/// The header is written even when there are no records.
pub fn write_records<W: Write>(writer: W, records: &[FlightLogRecord]) -> csv::Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(Field::ALL.map(Field::as_str))?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes one normalized file.
pub fn write_normalized(path: &Path, records: &[FlightLogRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    write_records(BufWriter::new(file), records).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// One source file successfully normalized to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOutput {
    pub source: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub dropped_columns: Vec<String>,
    pub missing_fields: Vec<Field>,
}

/// Result of a batch normalization run.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    pub written: Vec<NormalizedOutput>,
    pub failed: Vec<FailedFile>,
}

/// Normalizes every file matching `pattern` into `output_dir`.
///
/// Each output keeps its source file name. A file that cannot be read or
/// written is reported and skipped; the rest of the batch continues.
///
/// # Errors
///
/// Returns [`IngestError::NoSourceFiles`] when nothing matches, and
/// [`IngestError::FileWrite`] when the output directory cannot be created.
pub fn normalize_sources(
    pattern: &str,
    output_dir: &Path,
    format: &SourceFormat,
) -> Result<NormalizeReport> {
    let span = info_span!("normalize", pattern = %pattern, output_dir = %output_dir.display());
    let _guard = span.enter();

    let sources = discover_sources(pattern)?;
    if sources.is_empty() {
        return Err(IngestError::NoSourceFiles {
            pattern: pattern.to_string(),
        });
    }
    std::fs::create_dir_all(output_dir).map_err(|e| IngestError::FileWrite {
        path: output_dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut report = NormalizeReport::default();
    for source in sources {
        info!(path = %source.display(), "processing source file");
        match normalize_one(&source, output_dir, format) {
            Ok(output) => {
                info!(
                    path = %output.output.display(),
                    rows = output.rows,
                    "normalized file written"
                );
                report.written.push(output);
            }
            Err(error) => {
                warn!(path = %source.display(), error = %error, "source file skipped");
                report.failed.push(FailedFile {
                    path: source,
                    error,
                });
            }
        }
    }
    Ok(report)
}

fn normalize_one(source: &Path, output_dir: &Path, format: &SourceFormat) -> Result<NormalizedOutput> {
    let normalized = normalize_file(source, format)?;
    let file_name = source.file_name().ok_or_else(|| IngestError::FileNotFound {
        path: source.to_path_buf(),
    })?;
    let output = output_dir.join(file_name);
    write_normalized(&output, &normalized.records)?;
    Ok(NormalizedOutput {
        source: source.to_path_buf(),
        output,
        rows: normalized.records.len(),
        dropped_columns: normalized.plan.dropped,
        missing_fields: normalized.plan.missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_records_header_only() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Data,Diario_de_Bordo,Origem,Destino,Aeronave,Orgao,Situacao,Horas_Voadas,Passageiros,Ano\n"
        );
    }

    #[test]
    fn test_write_records_quotes_delimiters() {
        let record = FlightLogRecord::from_fields([
            (Field::Data, "15/03/2022"),
            (Field::Destino, "Belo Horizonte, MG"),
        ]);
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[record]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("15/03/2022,,,\"Belo Horizonte, MG\",,,,,,2022\n"));
    }

    #[test]
    fn test_normalize_sources_writes_one_file_per_source() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(
            input.path().join("voos_2021.csv"),
            b"Data;\xd3rg\xe3o;Nome\n15/03/2021;SEF;Ana\n",
        )
        .unwrap();
        std::fs::write(input.path().join("voos_2022.csv"), b"Data,Nome\n").unwrap();

        let pattern = input.path().join("voos_*.csv").display().to_string();
        let report = normalize_sources(&pattern, output.path(), &SourceFormat::raw()).unwrap();

        assert_eq!(report.written.len(), 2);
        assert!(report.failed.is_empty());
        let written = std::fs::read_to_string(output.path().join("voos_2021.csv")).unwrap();
        assert!(written.contains("15/03/2021,,,,,SEF,,,Ana,2021"));
    }

    #[test]
    fn test_normalize_sources_requires_input() {
        let input = TempDir::new().unwrap();
        let pattern = input.path().join("voos_*.csv").display().to_string();
        let result = normalize_sources(&pattern, input.path(), &SourceFormat::raw());
        assert!(matches!(result, Err(IngestError::NoSourceFiles { .. })));
    }
}

//! Record normalization: raw source rows to canonical records.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use voos_model::{Field, FlightLogRecord, HeaderTable};

use crate::csv::{RawTable, read_raw_table};
use crate::error::Result;
use crate::format::SourceFormat;

/// How the columns of one source file map onto the canonical schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Source column index and the field it feeds, in source order.
    assignments: Vec<(usize, Field)>,
    /// Headers with no entry in the rename table.
    pub dropped: Vec<String>,
    /// Headers that resolved to a field already fed by an earlier column.
    pub duplicates: Vec<String>,
    /// Source fields no column feeds; their values stay empty.
    pub missing: Vec<Field>,
}

impl ColumnPlan {
    /// Resolves every header through the rename table.
    ///
    /// The first column resolving to a field wins. Columns resolving to a
    /// derived field (`Ano`) are recognized but never read.
    pub fn resolve(headers: &[String], table: &HeaderTable) -> Self {
        let mut plan = ColumnPlan::default();
        for (idx, header) in headers.iter().enumerate() {
            match table.resolve(header) {
                Some(field) if field.is_derived() => {}
                Some(field) if plan.feeds(field) => plan.duplicates.push(header.clone()),
                Some(field) => plan.assignments.push((idx, field)),
                None => plan.dropped.push(header.clone()),
            }
        }
        plan.missing = Field::ALL
            .into_iter()
            .filter(|field| !field.is_derived() && !plan.feeds(*field))
            .collect();
        plan
    }

    pub fn feeds(&self, field: Field) -> bool {
        self.assignments.iter().any(|(_, assigned)| *assigned == field)
    }

    /// Builds the canonical record for one source row.
    pub fn apply(&self, row: &[String]) -> FlightLogRecord {
        FlightLogRecord::from_fields(self.assignments.iter().map(|(idx, field)| {
            (*field, row.get(*idx).cloned().unwrap_or_default())
        }))
    }
}

/// The canonical rows produced from one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFile {
    pub path: PathBuf,
    pub records: Vec<FlightLogRecord>,
    pub plan: ColumnPlan,
}

/// Normalizes an already-read table, one record per row.
pub fn normalize_table(
    table: &RawTable,
    headers: &HeaderTable,
) -> (Vec<FlightLogRecord>, ColumnPlan) {
    let plan = ColumnPlan::resolve(&table.headers, headers);
    let records = table.rows.iter().map(|row| plan.apply(row)).collect();
    (records, plan)
}

/// Reads and normalizes one source file with the standard rename table.
pub fn normalize_file(path: &Path, format: &SourceFormat) -> Result<NormalizedFile> {
    let table = read_raw_table(path, format)?;
    Ok(normalize_loaded(path, &table))
}

pub(crate) fn normalize_loaded(path: &Path, table: &RawTable) -> NormalizedFile {
    let (records, plan) = normalize_table(table, HeaderTable::standard());
    report_plan(path, &plan);
    NormalizedFile {
        path: path.to_path_buf(),
        records,
        plan,
    }
}

fn report_plan(path: &Path, plan: &ColumnPlan) {
    for header in &plan.dropped {
        debug!(path = %path.display(), header = %header, "dropping unrecognized column");
    }
    for header in &plan.duplicates {
        warn!(
            path = %path.display(),
            header = %header,
            "column maps to a field already read from an earlier column; ignoring it"
        );
    }
    if !plan.missing.is_empty() {
        let missing: Vec<&str> = plan.missing.iter().map(|field| field.as_str()).collect();
        warn!(
            path = %path.display(),
            missing = %missing.join(", "),
            "source file lacks canonical columns; values left empty"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_raw_table;

    const RAW_2021: &str = "Data;Número DB;Origem;Destino;Aeronave;Órgãos;Histórico;Horas Voadas;Nome;Observação\n\
        15/03/2021;1001;Pampulha (PLU);Confins (CNF);PR-ABC;SEF;realizado;1.5;Ana;x\n\
        15/03/2021;1001;Pampulha (PLU);Confins (CNF);PR-ABC;SEF;realizado;1.5;Bruno;y\n";

    fn table(text: &str) -> RawTable {
        parse_raw_table(Path::new("voos_2021.csv"), text, b';').unwrap()
    }

    #[test]
    fn renames_variant_headers() {
        let (records, plan) = normalize_table(&table(RAW_2021), HeaderTable::standard());

        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.diario_de_bordo, "1001");
        assert_eq!(first.orgao, "SEF");
        assert_eq!(first.situacao, "realizado");
        assert_eq!(first.horas_voadas, "1.5");
        assert_eq!(first.passageiros, "Ana");
        assert_eq!(first.ano, "2021");
        assert_eq!(plan.dropped, vec!["Observação"]);
        assert!(plan.missing.is_empty());
    }

    #[test]
    fn missing_columns_stay_empty() {
        let (records, plan) =
            normalize_table(&table("Data;Nome\n01/02/2020;Ana\n"), HeaderTable::standard());
        assert_eq!(records[0].orgao, "");
        assert_eq!(records[0].ano, "2020");
        assert!(plan.missing.contains(&Field::Orgao));
        assert!(!plan.missing.contains(&Field::Ano));
    }

    #[test]
    fn no_data_column_leaves_ano_empty() {
        let (records, _) = normalize_table(
            &table("Nome;Ano;Destino\nAna;2020;Confins\n"),
            HeaderTable::standard(),
        );
        assert_eq!(records[0].data, "");
        assert_eq!(records[0].ano, "");
        assert_eq!(records[0].destino, "Confins");
    }

    #[test]
    fn first_duplicate_column_wins() {
        let (records, plan) = normalize_table(
            &table("Órgão;Órgãos\nSEF;SEPLAG\n"),
            HeaderTable::standard(),
        );
        assert_eq!(records[0].orgao, "SEF");
        assert_eq!(plan.duplicates, vec!["Órgãos"]);
    }

    #[test]
    fn headers_are_trimmed_before_lookup() {
        let (records, _) = normalize_table(
            &table(" Horas Voadas ; Nome \n2;Ana\n"),
            HeaderTable::standard(),
        );
        assert_eq!(records[0].horas_voadas, "2");
        assert_eq!(records[0].passageiros, "Ana");
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = table(RAW_2021);
        let (first, _) = normalize_table(&raw, HeaderTable::standard());
        let (second, _) = normalize_table(&raw, HeaderTable::standard());
        assert_eq!(first, second);
    }

    #[test]
    fn delimiter_only_row_yields_an_empty_record() {
        let (records, _) = normalize_table(
            &table("Data;Nome\n;\n01/01/2021;Ana\n"),
            HeaderTable::standard(),
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], FlightLogRecord::default());
        assert_eq!(records[1].passageiros, "Ana");
        assert_eq!(records[1].ano, "2021");
    }
}

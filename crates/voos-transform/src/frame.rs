//! Polars frames over record slices, and CSV export.
//!
//! Every canonical column is a `String` column; flight frames add
//! `Total_Passageiros` as `UInt32`.

use std::fs::File;
use std::path::Path;

use polars::prelude::{Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, SerWriter, Series};
use tracing::info;

use voos_model::{Field, FlightLogRecord, FlightRecord, FlightRow};

use crate::error::{Result, TransformError};

/// Builds a frame with the ten canonical columns.
pub fn passenger_frame(records: &[FlightLogRecord]) -> Result<DataFrame> {
    let columns = text_columns(records, &Field::ALL);
    Ok(DataFrame::new(columns)?)
}

/// Builds a frame with the flight key columns and the passenger total.
pub fn flight_frame(records: &[FlightRecord]) -> Result<DataFrame> {
    let mut columns = text_columns(records, &Field::FLIGHT_KEY);
    let totals: Vec<u32> = records
        .iter()
        .map(|record| u32::try_from(record.total_passageiros).unwrap_or(u32::MAX))
        .collect();
    columns.push(Series::new(FlightRecord::TOTAL_COLUMN.into(), totals).into_column());
    Ok(DataFrame::new(columns)?)
}

fn text_columns<R: FlightRow>(records: &[R], fields: &[Field]) -> Vec<Column> {
    fields
        .iter()
        .map(|field| {
            let values: Vec<&str> = records.iter().map(|record| record.field(*field)).collect();
            Series::new(field.as_str().into(), values).into_column()
        })
        .collect()
}

/// Writes a frame as comma-separated UTF-8 with a header row.
pub fn write_frame_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|source| TransformError::ExportCreate {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| TransformError::ExportWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    info!(path = %path.display(), rows = df.height(), "view exported");
    Ok(())
}

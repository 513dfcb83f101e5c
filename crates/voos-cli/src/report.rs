//! Report assembly: one filter request over a snapshot, at either grain.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::trace;

use voos_model::{Field, FlightLogRecord, FlightRecord, FlightRow};
use voos_transform::{
    DestinationCount, FilterRequest, FilteredView, Result as TransformResult, SummaryCards,
    YearHours, aggregate_flights, destination_ranking, flight_frame, hours_by_year,
    passenger_frame, run_request, write_frame_csv,
};

use crate::logging::redact_value;

/// Row granularity of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grain {
    /// One row per passenger, as loaded.
    #[default]
    Passenger,
    /// One row per flight with a passenger total.
    Flight,
}

/// Everything the report shows for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub status: String,
    pub grain: Grain,
    pub cards: SummaryCards,
    pub ranking: Vec<DestinationCount>,
    pub hours: Vec<YearHours>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Runs `request` over the snapshot and builds the report at `grain`.
///
/// Flight rows are aggregated from the whole snapshot before filtering.
pub fn build_report(
    records: &[FlightLogRecord],
    request: &FilterRequest,
    grain: Grain,
    top_n: usize,
    now: NaiveDateTime,
) -> ReportView {
    match grain {
        Grain::Passenger => {
            let view = run_request(records, request, now);
            assemble(view, grain, top_n, passenger_columns(), passenger_cells)
        }
        Grain::Flight => {
            let flights = aggregate_flights(records);
            let view = run_request(&flights, request, now);
            assemble(view, grain, top_n, flight_columns(), flight_cells)
        }
    }
}

fn assemble<R, F>(
    view: FilteredView<R>,
    grain: Grain,
    top_n: usize,
    columns: Vec<String>,
    cells: F,
) -> ReportView
where
    R: FlightRow,
    F: Fn(&R) -> Vec<String>,
{
    ReportView {
        status: view.status.to_string(),
        grain,
        cards: SummaryCards::from_records(&view.records),
        ranking: destination_ranking(&view.records, top_n),
        hours: hours_by_year(&view.records),
        columns,
        rows: view.records.iter().map(cells).collect(),
    }
}

/// Writes the rows selected by `request` as CSV.
pub fn export_view(
    records: &[FlightLogRecord],
    request: &FilterRequest,
    grain: Grain,
    now: NaiveDateTime,
    path: &Path,
) -> TransformResult<usize> {
    let mut df = match grain {
        Grain::Passenger => {
            let view = run_request(records, request, now);
            for record in view.records.iter().take(3) {
                trace!(
                    data = %record.data,
                    passageiro = %redact_value(&record.passageiros),
                    "exporting row"
                );
            }
            passenger_frame(&view.records)?
        }
        Grain::Flight => {
            let flights = aggregate_flights(records);
            flight_frame(&run_request(&flights, request, now).records)?
        }
    };
    write_frame_csv(&mut df, path)?;
    Ok(df.height())
}

pub fn passenger_columns() -> Vec<String> {
    Field::ALL.iter().map(|field| field.as_str().to_string()).collect()
}

pub fn flight_columns() -> Vec<String> {
    Field::FLIGHT_KEY
        .iter()
        .map(|field| field.as_str().to_string())
        .chain(std::iter::once(FlightRecord::TOTAL_COLUMN.to_string()))
        .collect()
}

fn passenger_cells(record: &FlightLogRecord) -> Vec<String> {
    record.values().iter().map(|value| (*value).to_string()).collect()
}

fn flight_cells(record: &FlightRecord) -> Vec<String> {
    Field::FLIGHT_KEY
        .iter()
        .map(|field| record.field(*field).to_string())
        .chain(std::iter::once(record.total_passageiros.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use voos_model::FilterSpec;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn rows() -> Vec<FlightLogRecord> {
        ["Ana", "Bia"]
            .into_iter()
            .map(|nome| {
                FlightLogRecord::from_fields([
                    (Field::Data, "15/03/2021"),
                    (Field::Destino, "Confins (CNF)"),
                    (Field::Passageiros, nome),
                ])
            })
            .collect()
    }

    #[test]
    fn flight_grain_rows_carry_totals() {
        let report = build_report(&rows(), &FilterRequest::Clear, Grain::Flight, 8, now());
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.columns.last().map(String::as_str), Some("Total_Passageiros"));
        assert_eq!(report.rows[0].last().map(String::as_str), Some("2"));
        assert_eq!(report.cards.passengers, 2);
    }

    #[test]
    fn passenger_grain_rows_follow_canonical_columns() {
        let request = FilterRequest::Apply(FilterSpec::all().with_ano("2021"));
        let report = build_report(&rows(), &request, Grain::Passenger, 8, now());
        assert_eq!(report.columns.len(), 10);
        assert_eq!(report.rows[1][8], "Bia");
        assert_eq!(report.status, "Filtrado — 2 registros");
    }
}

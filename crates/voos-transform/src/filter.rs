//! Conjunctive filtering of record slices.

use chrono::{Datelike, Duration, Local, NaiveDateTime};
use tracing::debug;

use voos_model::{
    Constraint, DateOrExcluded, FallbackPolicy, Field, FilterSpec, FlightRow, Month, Periodo,
    month_component,
};

/// A filtered subset and its size.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<R> {
    pub records: Vec<R>,
    pub count: usize,
}

impl<R> FilterOutcome<R> {
    pub fn new(records: Vec<R>) -> Self {
        let count = records.len();
        Self { records, count }
    }
}

/// Returns the rows satisfying every constraint of `spec`, in input order.
///
/// `now` anchors the `periodo` windows. The input is never modified.
pub fn filter_records<R>(records: &[R], spec: &FilterSpec, now: NaiveDateTime) -> FilterOutcome<R>
where
    R: FlightRow + Clone,
{
    let kept: Vec<R> = records
        .iter()
        .filter(|record| matches_spec(*record, spec, now))
        .cloned()
        .collect();
    debug!(
        input = records.len(),
        kept = kept.len(),
        active = spec.active_keys().len(),
        "records filtered"
    );
    FilterOutcome::new(kept)
}

/// [`filter_records`] anchored at the local wall clock.
pub fn filter_records_now<R>(records: &[R], spec: &FilterSpec) -> FilterOutcome<R>
where
    R: FlightRow + Clone,
{
    filter_records(records, spec, Local::now().naive_local())
}

/// Whether one row satisfies every constraint.
pub fn matches_spec<R: FlightRow + ?Sized>(record: &R, spec: &FilterSpec, now: NaiveDateTime) -> bool {
    text_matches(&spec.ano, record.field(Field::Ano))
        && month_matches(&spec.mes, record.field(Field::Data))
        && periodo_matches(&spec.periodo, record, now)
        && text_matches(&spec.origem, record.field(Field::Origem))
        && text_matches(&spec.destino, record.field(Field::Destino))
        && text_matches(&spec.orgao, record.field(Field::Orgao))
        && situacao_matches(&spec.situacao, record.field(Field::Situacao))
}

fn text_matches(constraint: &Constraint<String>, value: &str) -> bool {
    match constraint {
        Constraint::All => true,
        Constraint::Only(expected) => expected == value,
        Constraint::OutOfDomain(_) => false,
    }
}

fn situacao_matches(constraint: &Constraint<String>, value: &str) -> bool {
    match constraint {
        Constraint::All => true,
        Constraint::Only(expected) => expected.to_uppercase() == value.to_uppercase(),
        Constraint::OutOfDomain(_) => false,
    }
}

fn month_matches(constraint: &Constraint<Month>, data: &str) -> bool {
    match constraint {
        Constraint::All => true,
        Constraint::Only(month) => month.matches_component(month_component(data)),
        Constraint::OutOfDomain(_) => false,
    }
}

fn periodo_matches<R: FlightRow + ?Sized>(
    constraint: &Constraint<Periodo>,
    record: &R,
    now: NaiveDateTime,
) -> bool {
    let periodo = match constraint {
        Constraint::All => return true,
        Constraint::Only(periodo) => *periodo,
        Constraint::OutOfDomain(_) => return false,
    };
    match periodo.window_days() {
        Some(days) => {
            let cutoff = now - Duration::days(days);
            DateOrExcluded::apply(record.field(Field::Data))
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .is_some_and(|midnight| midnight >= cutoff)
        }
        None => {
            let year = match periodo {
                Periodo::LastYear => now.year() - 1,
                _ => now.year(),
            };
            record.field(Field::Ano) == year.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use voos_model::FlightLogRecord;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .and_then(|date| date.and_hms_opt(14, 30, 0))
            .unwrap()
    }

    fn row(data: &str, situacao: &str) -> FlightLogRecord {
        FlightLogRecord::from_fields([(Field::Data, data), (Field::Situacao, situacao)])
    }

    #[test]
    fn situacao_is_case_insensitive() {
        let rows = vec![row("01/01/2024", "REALIZADO"), row("01/01/2024", "cancelada")];
        let spec = FilterSpec::all().with_situacao("realizado");
        let outcome = filter_records(&rows, &spec, now());
        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.records[0].situacao, "REALIZADO");
    }

    #[test]
    fn invalid_date_is_excluded_from_windows() {
        let rows = vec![row("15/13/2022", ""), row("10/06/2024", "")];
        let spec = FilterSpec::all().with_periodo(Periodo::Last30Days);
        let outcome = filter_records(&rows, &spec, now());
        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.records[0].data, "10/06/2024");
    }

    #[test]
    fn seven_day_window_boundary() {
        // Cutoff is 08/06/2024 14:30; that day's midnight falls before it.
        let rows = vec![row("08/06/2024", ""), row("09/06/2024", ""), row("16/06/2024", "")];
        let spec = FilterSpec::all().with_periodo(Periodo::Last7Days);
        let outcome = filter_records(&rows, &spec, now());
        let dates: Vec<&str> = outcome.records.iter().map(|r| r.data.as_str()).collect();
        assert_eq!(dates, vec!["09/06/2024", "16/06/2024"]);
    }

    #[test]
    fn year_windows_compare_ano() {
        let rows = vec![row("01/01/2023", ""), row("01/01/2024", ""), row("", "")];
        let this_year = filter_records(&rows, &FilterSpec::all().with_periodo(Periodo::ThisYear), now());
        let last_year = filter_records(&rows, &FilterSpec::all().with_periodo(Periodo::LastYear), now());
        assert_eq!(this_year.records[0].ano, "2024");
        assert_eq!(this_year.count, 1);
        assert_eq!(last_year.records[0].ano, "2023");
        assert_eq!(last_year.count, 1);
    }

    #[test]
    fn month_matches_numerically() {
        let rows = vec![row("15/03/2022", ""), row("15/3/2022", ""), row("15/04/2022", ""), row("", "")];
        let spec = FilterSpec::all().with_mes(Month::new(3).unwrap());
        assert_eq!(filter_records(&rows, &spec, now()).count, 2);
    }

    #[test]
    fn out_of_domain_matches_nothing() {
        let rows = vec![row("15/03/2022", "")];
        let (spec, _) = FilterSpec::from_pairs([("periodo", "90d")]);
        assert_eq!(filter_records(&rows, &spec, now()).count, 0);
    }

    #[test]
    fn input_is_untouched() {
        let rows = vec![row("15/03/2022", "REALIZADO")];
        let before = rows.clone();
        let _ = filter_records(&rows, &FilterSpec::all().with_ano("1999"), now());
        assert_eq!(rows, before);
    }

    #[test]
    fn wall_clock_variant_keeps_unconstrained_rows() {
        let rows = vec![row("15/03/2022", ""), row("", "")];
        assert_eq!(filter_records_now(&rows, &FilterSpec::all()).count, 2);
    }

    #[test]
    fn empty_input() {
        let rows: Vec<FlightLogRecord> = Vec::new();
        let outcome = filter_records(&rows, &FilterSpec::all().with_ano("2022"), now());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.count, 0);
    }
}

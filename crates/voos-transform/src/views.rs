//! Report views computed from any record slice.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use voos_model::{ALL_VALUE, FilterKey, Field, FlightRow};

/// Number of destinations shown in the ranking.
pub const DEFAULT_TOP_DESTINATIONS: usize = 8;

/// Headline figures of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub flights: usize,
    pub total_hours: f64,
    pub mean_hours: f64,
    pub passengers: usize,
    pub distinct_years: usize,
    pub distinct_destinations: usize,
}

impl SummaryCards {
    pub fn from_records<R: FlightRow>(records: &[R]) -> Self {
        let total_hours: f64 = records.iter().map(FlightRow::hours).sum();
        let mean_hours = if records.is_empty() {
            0.0
        } else {
            total_hours / records.len() as f64
        };
        Self {
            flights: records.len(),
            total_hours,
            mean_hours,
            passengers: records.iter().map(FlightRow::passenger_count).sum(),
            distinct_years: distinct_values(records, Field::Ano).len(),
            distinct_destinations: distinct_values(records, Field::Destino).len(),
        }
    }
}

/// One bar of the destination ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationCount {
    pub destino: String,
    pub count: usize,
}

/// Destination name without its airport code: text before the first `(`.
pub fn simple_destination(destino: &str) -> &str {
    destino.split('(').next().unwrap_or_default().trim()
}

/// Most frequent destinations, one count per row.
///
/// Ordered by count descending, then name ascending, truncated to `top_n`.
pub fn destination_ranking<R: FlightRow>(records: &[R], top_n: usize) -> Vec<DestinationCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts
            .entry(simple_destination(record.field(Field::Destino)))
            .or_default() += 1;
    }
    let mut ranking: Vec<DestinationCount> = counts
        .into_iter()
        .map(|(destino, count)| DestinationCount {
            destino: destino.to_string(),
            count,
        })
        .collect();
    ranking.sort_by(|a, b| {
        Reverse(a.count)
            .cmp(&Reverse(b.count))
            .then_with(|| a.destino.cmp(&b.destino))
    });
    ranking.truncate(top_n);
    ranking
}

/// Flight hours of one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearHours {
    pub ano: String,
    pub hours: f64,
}

/// Sum of hours per `Ano`, in ascending year order.
pub fn hours_by_year<R: FlightRow>(records: &[R]) -> Vec<YearHours> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.field(Field::Ano)).or_default() += record.hours();
    }
    totals
        .into_iter()
        .map(|(ano, hours)| YearHours {
            ano: ano.to_string(),
            hours,
        })
        .collect()
}

/// Distinct values offered by the filter controls.
///
/// Empty values are left out: an empty selection already means `all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Newest first.
    pub anos: Vec<String>,
    pub origens: Vec<String>,
    pub destinos: Vec<String>,
    pub orgaos: Vec<String>,
}

impl FilterOptions {
    pub fn from_records<R: FlightRow>(records: &[R]) -> Self {
        let owned = |field| -> Vec<String> {
            distinct_values(records, field)
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        let mut anos = owned(Field::Ano);
        anos.reverse();
        Self {
            anos,
            origens: owned(Field::Origem),
            destinos: owned(Field::Destino),
            orgaos: owned(Field::Orgao),
        }
    }

    /// Choices for one control, `all` first. Keys without a data-driven
    /// list return `None`.
    pub fn choices(&self, key: FilterKey) -> Option<Vec<&str>> {
        let values = match key {
            FilterKey::Ano => &self.anos,
            FilterKey::Origem => &self.origens,
            FilterKey::Destino => &self.destinos,
            FilterKey::Orgao => &self.orgaos,
            FilterKey::Mes | FilterKey::Periodo | FilterKey::Situacao => return None,
        };
        Some(
            std::iter::once(ALL_VALUE)
                .chain(values.iter().map(String::as_str))
                .collect(),
        )
    }
}

fn distinct_values<R: FlightRow>(records: &[R], field: Field) -> BTreeSet<&str> {
    records
        .iter()
        .map(|record| record.field(field))
        .filter(|value| !value.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voos_model::{FlightLogRecord, FlightRecord};

    fn row(data: &str, destino: &str, horas: &str, nome: &str) -> FlightLogRecord {
        FlightLogRecord::from_fields([
            (Field::Data, data),
            (Field::Destino, destino),
            (Field::HorasVoadas, horas),
            (Field::Passageiros, nome),
        ])
    }

    #[test]
    fn simple_destination_drops_code() {
        assert_eq!(simple_destination("Confins (CNF)"), "Confins");
        assert_eq!(simple_destination("Uberaba"), "Uberaba");
        assert_eq!(simple_destination(""), "");
    }

    #[test]
    fn ranking_breaks_ties_by_name() {
        let rows = vec![
            row("", "Uberaba (UBA)", "", ""),
            row("", "Confins (CNF)", "", ""),
            row("", "Araxá (AAX)", "", ""),
            row("", "Confins", "", ""),
        ];
        let ranking = destination_ranking(&rows, 2);
        assert_eq!(
            ranking,
            vec![
                DestinationCount {
                    destino: "Confins".to_string(),
                    count: 2
                },
                DestinationCount {
                    destino: "Araxá".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn hours_sum_per_year_with_fallback() {
        let rows = vec![
            row("01/01/2021", "", "1.5", ""),
            row("01/01/2020", "", "2", ""),
            row("02/01/2021", "", "abc", ""),
            row("03/01/2021", "", "0.5", ""),
        ];
        let hours = hours_by_year(&rows);
        assert_eq!(hours.len(), 2);
        assert_eq!(hours[0].ano, "2020");
        assert!((hours[0].hours - 2.0).abs() < 1e-9);
        assert!((hours[1].hours - 2.0).abs() < 1e-9);
    }

    #[test]
    fn summary_of_passenger_rows() {
        let rows = vec![
            row("01/01/2021", "Confins (CNF)", "1", "Ana"),
            row("01/01/2021", "Confins (CNF)", "1", ""),
            row("01/01/2020", "Uberaba (UBA)", "x", "Bia"),
        ];
        let cards = SummaryCards::from_records(&rows);
        assert_eq!(cards.flights, 3);
        assert!((cards.total_hours - 2.0).abs() < 1e-9);
        assert!((cards.mean_hours - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(cards.passengers, 2);
        assert_eq!(cards.distinct_years, 2);
        assert_eq!(cards.distinct_destinations, 2);
    }

    #[test]
    fn summary_of_flight_rows_sums_totals() {
        let flights = vec![
            FlightRecord {
                total_passageiros: 3,
                ..FlightRecord::default()
            },
            FlightRecord {
                total_passageiros: 2,
                ..FlightRecord::default()
            },
        ];
        assert_eq!(SummaryCards::from_records(&flights).passengers, 5);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let cards = SummaryCards::from_records::<FlightLogRecord>(&[]);
        assert_eq!(cards.flights, 0);
        assert_eq!(cards.mean_hours, 0.0);
    }

    #[test]
    fn options_are_sorted_with_all_first() {
        let rows = vec![
            FlightLogRecord::from_fields([(Field::Data, "01/01/2020"), (Field::Origem, "Pampulha")]),
            FlightLogRecord::from_fields([(Field::Data, "01/01/2022"), (Field::Origem, "Confins")]),
            FlightLogRecord::from_fields([(Field::Data, "01/01/2021"), (Field::Origem, "")]),
        ];
        let options = FilterOptions::from_records(&rows);
        assert_eq!(options.anos, vec!["2022", "2021", "2020"]);
        assert_eq!(
            options.choices(FilterKey::Origem),
            Some(vec!["all", "Confins", "Pampulha"])
        );
        assert_eq!(options.choices(FilterKey::Mes), None);
    }
}

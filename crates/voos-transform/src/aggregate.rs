//! Passenger rows to flight rows.

use std::collections::BTreeMap;

use tracing::debug;

use voos_model::{FlightKey, FlightLogRecord, FlightRecord};

/// Collapses passenger rows into one row per flight.
///
/// Rows sharing the nine-field flight key become one [`FlightRecord`] whose
/// `total_passageiros` is the number of rows in the group. Empty values are
/// valid key parts. Output is ordered by the key, field by field.
pub fn aggregate_flights(records: &[FlightLogRecord]) -> Vec<FlightRecord> {
    let mut groups: BTreeMap<FlightKey<'_>, usize> = BTreeMap::new();
    for record in records {
        *groups.entry(record.flight_key()).or_default() += 1;
    }
    debug!(
        passengers = records.len(),
        flights = groups.len(),
        "flights aggregated"
    );
    groups
        .into_iter()
        .map(|(key, count)| FlightRecord::from_key(key, count))
        .collect()
}

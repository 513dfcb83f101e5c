//! Passenger-grain and flight-grain records.

use serde::{Deserialize, Serialize};

use crate::fallback::{FallbackPolicy, NumericOrZero};
use crate::field::Field;

/// Read access shared by both record grains.
///
/// Filters and report views are written against this trait so they run
/// unchanged over passenger rows and aggregated flight rows.
pub trait FlightRow {
    /// Returns the text value of a canonical field.
    fn field(&self, field: Field) -> &str;

    /// Number of passengers this row stands for.
    fn passenger_count(&self) -> usize;

    /// Flight hours under the [`NumericOrZero`] policy.
    fn hours(&self) -> f64 {
        NumericOrZero::apply(self.field(Field::HorasVoadas))
    }
}

/// Derives the year from a `Data` value: its last four characters, verbatim.
pub fn derive_ano(data: &str) -> String {
    let count = data.chars().count();
    data.chars().skip(count.saturating_sub(4)).collect()
}

/// One passenger on one flight leg, every canonical field present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightLogRecord {
    #[serde(rename = "Data", default)]
    pub data: String,
    #[serde(rename = "Diario_de_Bordo", default)]
    pub diario_de_bordo: String,
    #[serde(rename = "Origem", default)]
    pub origem: String,
    #[serde(rename = "Destino", default)]
    pub destino: String,
    #[serde(rename = "Aeronave", default)]
    pub aeronave: String,
    #[serde(rename = "Orgao", default)]
    pub orgao: String,
    #[serde(rename = "Situacao", default)]
    pub situacao: String,
    #[serde(rename = "Horas_Voadas", default)]
    pub horas_voadas: String,
    #[serde(rename = "Passageiros", default)]
    pub passageiros: String,
    #[serde(rename = "Ano", default)]
    pub ano: String,
}

impl FlightLogRecord {
    /// Builds a record from field/value pairs and derives `Ano` from `Data`.
    ///
    /// A pair for [`Field::Ano`] is ignored; fields without a pair stay empty.
    pub fn from_fields<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (Field, V)>,
        V: Into<String>,
    {
        let mut record = Self::default();
        for (field, value) in values {
            if !field.is_derived() {
                record.set(field, value.into());
            }
        }
        record.ano = derive_ano(&record.data);
        record
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Data => &self.data,
            Field::DiarioDeBordo => &self.diario_de_bordo,
            Field::Origem => &self.origem,
            Field::Destino => &self.destino,
            Field::Aeronave => &self.aeronave,
            Field::Orgao => &self.orgao,
            Field::Situacao => &self.situacao,
            Field::HorasVoadas => &self.horas_voadas,
            Field::Passageiros => &self.passageiros,
            Field::Ano => &self.ano,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Data => &mut self.data,
            Field::DiarioDeBordo => &mut self.diario_de_bordo,
            Field::Origem => &mut self.origem,
            Field::Destino => &mut self.destino,
            Field::Aeronave => &mut self.aeronave,
            Field::Orgao => &mut self.orgao,
            Field::Situacao => &mut self.situacao,
            Field::HorasVoadas => &mut self.horas_voadas,
            Field::Passageiros => &mut self.passageiros,
            Field::Ano => &mut self.ano,
        };
        *slot = value;
    }

    /// Values in canonical column order.
    pub fn values(&self) -> [&str; 10] {
        Field::ALL.map(|field| self.get(field))
    }

    /// Borrowed grouping key of the flight this passenger row belongs to.
    pub fn flight_key(&self) -> FlightKey<'_> {
        FlightKey(Field::FLIGHT_KEY.map(|field| self.get(field)))
    }
}

impl FlightRow for FlightLogRecord {
    fn field(&self, field: Field) -> &str {
        self.get(field)
    }

    fn passenger_count(&self) -> usize {
        usize::from(!self.passageiros.is_empty())
    }
}

/// Grouping key of a flight, ordered field by field in [`Field::FLIGHT_KEY`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightKey<'a>(pub [&'a str; 9]);

impl FlightKey<'_> {
    pub fn get(&self, field: Field) -> Option<&str> {
        Field::FLIGHT_KEY
            .iter()
            .position(|candidate| *candidate == field)
            .map(|idx| self.0[idx])
    }
}

/// One flight with the number of passenger rows that share its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightRecord {
    #[serde(rename = "Data")]
    pub data: String,
    #[serde(rename = "Diario_de_Bordo")]
    pub diario_de_bordo: String,
    #[serde(rename = "Origem")]
    pub origem: String,
    #[serde(rename = "Destino")]
    pub destino: String,
    #[serde(rename = "Horas_Voadas")]
    pub horas_voadas: String,
    #[serde(rename = "Aeronave")]
    pub aeronave: String,
    #[serde(rename = "Orgao")]
    pub orgao: String,
    #[serde(rename = "Situacao")]
    pub situacao: String,
    #[serde(rename = "Ano")]
    pub ano: String,
    #[serde(rename = "Total_Passageiros")]
    pub total_passageiros: usize,
}

impl FlightRecord {
    /// Column name of the passenger count.
    pub const TOTAL_COLUMN: &'static str = "Total_Passageiros";

    pub fn from_key(key: FlightKey<'_>, total_passageiros: usize) -> Self {
        let [
            data,
            diario_de_bordo,
            origem,
            destino,
            horas_voadas,
            aeronave,
            orgao,
            situacao,
            ano,
        ] = key.0;
        Self {
            data: data.to_string(),
            diario_de_bordo: diario_de_bordo.to_string(),
            origem: origem.to_string(),
            destino: destino.to_string(),
            horas_voadas: horas_voadas.to_string(),
            aeronave: aeronave.to_string(),
            orgao: orgao.to_string(),
            situacao: situacao.to_string(),
            ano: ano.to_string(),
            total_passageiros,
        }
    }

    pub fn key(&self) -> FlightKey<'_> {
        FlightKey(Field::FLIGHT_KEY.map(|field| self.field(field)))
    }
}

impl FlightRow for FlightRecord {
    fn field(&self, field: Field) -> &str {
        match field {
            Field::Data => &self.data,
            Field::DiarioDeBordo => &self.diario_de_bordo,
            Field::Origem => &self.origem,
            Field::Destino => &self.destino,
            Field::Aeronave => &self.aeronave,
            Field::Orgao => &self.orgao,
            Field::Situacao => &self.situacao,
            Field::HorasVoadas => &self.horas_voadas,
            Field::Ano => &self.ano,
            Field::Passageiros => "",
        }
    }

    fn passenger_count(&self) -> usize {
        self.total_passageiros
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ano_is_last_four_characters() {
        assert_eq!(derive_ano("15/03/2022"), "2022");
        assert_eq!(derive_ano("2022"), "2022");
        assert_eq!(derive_ano("22"), "22");
        assert_eq!(derive_ano(""), "");
        assert_eq!(derive_ano("15/03/22"), "3/22");
    }

    #[test]
    fn from_fields_derives_ano_and_ignores_supplied_year() {
        let record = FlightLogRecord::from_fields([
            (Field::Data, "01/02/2021"),
            (Field::Ano, "1999"),
            (Field::Orgao, "SEF"),
        ]);
        assert_eq!(record.ano, "2021");
        assert_eq!(record.orgao, "SEF");
        assert_eq!(record.destino, "");
    }

    #[test]
    fn flight_key_round_trips_through_flight_record() {
        let record = FlightLogRecord::from_fields([
            (Field::Data, "01/02/2021"),
            (Field::DiarioDeBordo, "DB-7"),
            (Field::HorasVoadas, "1.2"),
            (Field::Passageiros, "Maria"),
        ]);
        let flight = FlightRecord::from_key(record.flight_key(), 1);
        assert_eq!(flight.key(), record.flight_key());
        assert_eq!(flight.key().get(Field::DiarioDeBordo), Some("DB-7"));
        assert_eq!(flight.key().get(Field::Passageiros), None);
    }

    #[test]
    fn passenger_count_by_grain() {
        let with_name = FlightLogRecord::from_fields([(Field::Passageiros, "Ana")]);
        let without_name = FlightLogRecord::default();
        assert_eq!(with_name.passenger_count(), 1);
        assert_eq!(without_name.passenger_count(), 0);
        let flight = FlightRecord {
            total_passageiros: 4,
            ..FlightRecord::default()
        };
        assert_eq!(flight.passenger_count(), 4);
    }
}

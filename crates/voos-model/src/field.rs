//! Canonical field set shared by every normalized flight-log file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// One column of the canonical schema.
///
/// The declaration order is the canonical column order used when records
/// are written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Flight date, `dd/mm/yyyy` text.
    Data,
    /// Flight-log (diário de bordo) identifier.
    DiarioDeBordo,
    Origem,
    /// Destination label, may carry a parenthetical airport code.
    Destino,
    Aeronave,
    /// Requesting government body.
    Orgao,
    /// Flight status (REALIZADO, PLANEJADA, CANCELADA).
    Situacao,
    /// Flight duration carried as text.
    HorasVoadas,
    /// Passenger name, one row per passenger.
    Passageiros,
    /// Year derived from the last four characters of `Data`.
    Ano,
}

impl Field {
    /// All canonical fields in column order.
    pub const ALL: [Field; 10] = [
        Field::Data,
        Field::DiarioDeBordo,
        Field::Origem,
        Field::Destino,
        Field::Aeronave,
        Field::Orgao,
        Field::Situacao,
        Field::HorasVoadas,
        Field::Passageiros,
        Field::Ano,
    ];

    /// Grouping key of a flight, in group-by order.
    pub const FLIGHT_KEY: [Field; 9] = [
        Field::Data,
        Field::DiarioDeBordo,
        Field::Origem,
        Field::Destino,
        Field::HorasVoadas,
        Field::Aeronave,
        Field::Orgao,
        Field::Situacao,
        Field::Ano,
    ];

    /// Returns the canonical column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Data => "Data",
            Field::DiarioDeBordo => "Diario_de_Bordo",
            Field::Origem => "Origem",
            Field::Destino => "Destino",
            Field::Aeronave => "Aeronave",
            Field::Orgao => "Orgao",
            Field::Situacao => "Situacao",
            Field::HorasVoadas => "Horas_Voadas",
            Field::Passageiros => "Passageiros",
            Field::Ano => "Ano",
        }
    }

    /// Returns the human-facing column label used in report tables.
    pub fn label(self) -> &'static str {
        match self {
            Field::DiarioDeBordo => "Diário de Bordo",
            Field::HorasVoadas => "Horas Voadas",
            Field::Orgao => "Órgão",
            Field::Situacao => "Situação",
            other => other.as_str(),
        }
    }

    /// Returns true for fields computed by the normalizer instead of read from source.
    pub fn is_derived(self) -> bool {
        matches!(self, Field::Ano)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    /// Parses an exact canonical column name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn flight_key_excludes_passengers() {
        assert!(!Field::FLIGHT_KEY.contains(&Field::Passageiros));
        assert_eq!(Field::FLIGHT_KEY.len(), 9);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(matches!(
            "Passageiro".parse::<Field>(),
            Err(ModelError::UnknownField(_))
        ));
    }
}

//! Filter specification built per query by the UI or CLI layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::ModelError;

/// Sentinel value meaning "no constraint".
pub const ALL_VALUE: &str = "all";

/// Constraint on one filter field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Constraint<T> {
    /// No constraint.
    #[default]
    All,
    /// Only rows matching this value.
    Only(T),
    /// A supplied value outside the field's domain. Matches no row.
    OutOfDomain(String),
}

impl<T> Constraint<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Constraint::All)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Constraint::Only(value) => Some(value),
            _ => None,
        }
    }

    /// Parses a raw value. Missing, empty or `all` means no constraint; a value
    /// the parser rejects is kept as [`Constraint::OutOfDomain`].
    pub fn parse_with<F>(raw: Option<&str>, parse: F) -> Self
    where
        F: FnOnce(&str) -> Option<T>,
    {
        match raw {
            None => Constraint::All,
            Some(value) if value.is_empty() || value == ALL_VALUE => Constraint::All,
            Some(value) => match parse(value) {
                Some(parsed) => Constraint::Only(parsed),
                None => Constraint::OutOfDomain(value.to_string()),
            },
        }
    }
}

impl<T: fmt::Display> fmt::Display for Constraint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::All => f.write_str(ALL_VALUE),
            Constraint::Only(value) => write!(f, "{value}"),
            Constraint::OutOfDomain(raw) => write!(f, "{raw} (out of domain)"),
        }
    }
}

/// Calendar month, 1 to 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    pub fn new(number: u8) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Portuguese month name, as shown in the month selector.
    pub fn name(self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Janeiro",
            "Fevereiro",
            "Março",
            "Abril",
            "Maio",
            "Junho",
            "Julho",
            "Agosto",
            "Setembro",
            "Outubro",
            "Novembro",
            "Dezembro",
        ];
        NAMES[usize::from(self.0 - 1)]
    }

    /// Returns true when a `dd/mm/yyyy` month component denotes this month.
    ///
    /// The component is compared as text, with one leading zero allowed:
    /// `03` and `3` are both March, while `003` or `+3` never match.
    pub fn matches_component(self, component: &str) -> bool {
        let digits = if component.len() == 2 {
            component.strip_prefix('0').unwrap_or(component)
        } else {
            component
        };
        digits == self.0.to_string()
    }
}

impl TryFrom<u8> for Month {
    type Error = ModelError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Month::new(number).ok_or_else(|| ModelError::InvalidMonth(number.to_string()))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Month {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Month::new)
            .ok_or_else(|| ModelError::InvalidMonth(s.to_string()))
    }
}

/// Relative time window evaluated against the wall clock at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periodo {
    /// `7d`
    Last7Days,
    /// `30d`
    Last30Days,
    /// `this_year`
    ThisYear,
    /// `last_year`
    LastYear,
}

impl Periodo {
    pub const ALL: [Periodo; 4] = [
        Periodo::Last7Days,
        Periodo::Last30Days,
        Periodo::ThisYear,
        Periodo::LastYear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Periodo::Last7Days => "7d",
            Periodo::Last30Days => "30d",
            Periodo::ThisYear => "this_year",
            Periodo::LastYear => "last_year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Periodo::Last7Days => "Últimos 7 dias",
            Periodo::Last30Days => "Últimos 30 dias",
            Periodo::ThisYear => "Este ano",
            Periodo::LastYear => "Ano anterior",
        }
    }

    /// Length of a day window, `None` for year windows.
    pub fn window_days(self) -> Option<i64> {
        match self {
            Periodo::Last7Days => Some(7),
            Periodo::Last30Days => Some(30),
            Periodo::ThisYear | Periodo::LastYear => None,
        }
    }
}

impl fmt::Display for Periodo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodo {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Periodo::ALL
            .into_iter()
            .find(|periodo| periodo.as_str() == s)
            .ok_or_else(|| ModelError::UnknownPeriodo(s.to_string()))
    }
}

/// Known flight statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Situacao {
    Realizado,
    Planejada,
    Cancelada,
}

impl Situacao {
    pub const ALL: [Situacao; 3] = [
        Situacao::Realizado,
        Situacao::Planejada,
        Situacao::Cancelada,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Situacao::Realizado => "REALIZADO",
            Situacao::Planejada => "PLANEJADA",
            Situacao::Cancelada => "CANCELADA",
        }
    }
}

impl FromStr for Situacao {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Situacao::ALL
            .into_iter()
            .find(|situacao| situacao.as_str() == upper)
            .ok_or_else(|| ModelError::UnknownSituacao(s.to_string()))
    }
}

/// The seven keys a filter request may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Ano,
    Mes,
    Periodo,
    Origem,
    Destino,
    Orgao,
    Situacao,
}

impl FilterKey {
    pub const ALL: [FilterKey; 7] = [
        FilterKey::Ano,
        FilterKey::Mes,
        FilterKey::Periodo,
        FilterKey::Origem,
        FilterKey::Destino,
        FilterKey::Orgao,
        FilterKey::Situacao,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Ano => "ano",
            FilterKey::Mes => "mes",
            FilterKey::Periodo => "periodo",
            FilterKey::Origem => "origem",
            FilterKey::Destino => "destino",
            FilterKey::Orgao => "orgao",
            FilterKey::Situacao => "situacao",
        }
    }
}

impl FromStr for FilterKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ModelError::UnknownFilterKey(s.to_string()))
    }
}

/// Conjunctive set of field constraints describing one filtering request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub ano: Constraint<String>,
    pub mes: Constraint<Month>,
    pub periodo: Constraint<Periodo>,
    pub origem: Constraint<String>,
    pub destino: Constraint<String>,
    pub orgao: Constraint<String>,
    pub situacao: Constraint<String>,
}

impl FilterSpec {
    /// A spec with every field set to `all`.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a spec from a flat key/value mapping.
    ///
    /// Absent keys stay `all`. Unknown keys are logged and returned; they
    /// never fail the request.
    pub fn from_pairs<I, K, V>(pairs: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut spec = Self::default();
        let mut unknown = Vec::new();
        for (key, value) in pairs {
            match key.as_ref().parse::<FilterKey>() {
                Ok(key) => spec.set(key, value.as_ref()),
                Err(_) => {
                    warn!(key = %key.as_ref(), "ignoring unknown filter key");
                    unknown.push(key.as_ref().to_string());
                }
            }
        }
        (spec, unknown)
    }

    /// Sets one field from its raw text value.
    pub fn set(&mut self, key: FilterKey, raw: &str) {
        let raw = Some(raw);
        match key {
            FilterKey::Ano => self.ano = text_constraint(raw),
            FilterKey::Mes => self.mes = Constraint::parse_with(raw, |v| v.parse().ok()),
            FilterKey::Periodo => self.periodo = Constraint::parse_with(raw, |v| v.parse().ok()),
            FilterKey::Origem => self.origem = text_constraint(raw),
            FilterKey::Destino => self.destino = text_constraint(raw),
            FilterKey::Orgao => self.orgao = text_constraint(raw),
            FilterKey::Situacao => self.situacao = text_constraint(raw),
        }
    }

    pub fn with_ano(mut self, ano: impl Into<String>) -> Self {
        self.ano = Constraint::Only(ano.into());
        self
    }

    pub fn with_mes(mut self, mes: Month) -> Self {
        self.mes = Constraint::Only(mes);
        self
    }

    pub fn with_periodo(mut self, periodo: Periodo) -> Self {
        self.periodo = Constraint::Only(periodo);
        self
    }

    pub fn with_origem(mut self, origem: impl Into<String>) -> Self {
        self.origem = Constraint::Only(origem.into());
        self
    }

    pub fn with_destino(mut self, destino: impl Into<String>) -> Self {
        self.destino = Constraint::Only(destino.into());
        self
    }

    pub fn with_orgao(mut self, orgao: impl Into<String>) -> Self {
        self.orgao = Constraint::Only(orgao.into());
        self
    }

    pub fn with_situacao(mut self, situacao: impl Into<String>) -> Self {
        self.situacao = Constraint::Only(situacao.into());
        self
    }

    /// Keys carrying a constraint other than `all`.
    pub fn active_keys(&self) -> Vec<FilterKey> {
        FilterKey::ALL
            .into_iter()
            .filter(|key| !self.is_all(*key))
            .collect()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_keys().is_empty()
    }

    fn is_all(&self, key: FilterKey) -> bool {
        match key {
            FilterKey::Ano => self.ano.is_all(),
            FilterKey::Mes => self.mes.is_all(),
            FilterKey::Periodo => self.periodo.is_all(),
            FilterKey::Origem => self.origem.is_all(),
            FilterKey::Destino => self.destino.is_all(),
            FilterKey::Orgao => self.orgao.is_all(),
            FilterKey::Situacao => self.situacao.is_all(),
        }
    }
}

fn text_constraint(raw: Option<&str>) -> Constraint<String> {
    Constraint::parse_with(raw, |value| Some(value.to_string()))
}

//! Header rename table.
//!
//! Yearly exports spell the same logical column in different ways
//! (`Órgão`, `Órgãos`, `Órgáo`, ...). The table below is the single place
//! where those spellings are declared. Lookups are tolerant to case,
//! diacritics, surrounding whitespace and `_` versus space, so the canonical
//! names themselves resolve through the same table.

use std::collections::HashMap;
use std::sync::OnceLock;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::field::Field;

/// Known header spellings and the canonical field each one maps to.
pub const HEADER_ALIASES: &[(&str, Field)] = &[
    ("Data", Field::Data),
    ("Número DB", Field::DiarioDeBordo),
    ("Diário de Bordo", Field::DiarioDeBordo),
    ("Diario_de_Bordo", Field::DiarioDeBordo),
    ("Origem", Field::Origem),
    ("Destino", Field::Destino),
    ("Aeronave", Field::Aeronave),
    ("Órgáo", Field::Orgao),
    ("Órgáos", Field::Orgao),
    ("Órgão", Field::Orgao),
    ("Órgãos", Field::Orgao),
    ("Orgao", Field::Orgao),
    ("Histórico", Field::Situacao),
    ("Situação", Field::Situacao),
    ("Situacao", Field::Situacao),
    ("Horas Voadas", Field::HorasVoadas),
    ("Horas_Voadas", Field::HorasVoadas),
    ("Nome", Field::Passageiros),
    ("Passageiros", Field::Passageiros),
    ("Ano", Field::Ano),
];

/// Folds a header into its lookup key.
///
/// Trims, drops a leading BOM, strips diacritics, lowercases and collapses
/// runs of whitespace or underscores into one space.
pub fn fold_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('\u{feff}').trim();
    let stripped: String = trimmed
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(|ch| if ch == '_' { ' ' } else { ch })
        .collect::<String>()
        .to_lowercase();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Column-name pass applied at merge time: trim, then spaces to underscores.
pub fn canonical_column_name(raw: &str) -> String {
    raw.trim().replace(' ', "_")
}

/// Folded alias lookup built from an alias list.
#[derive(Debug, Clone)]
pub struct HeaderTable {
    aliases: HashMap<String, Field>,
}

impl HeaderTable {
    /// Builds a table from explicit aliases. Later entries override earlier ones.
    pub fn new<'a, I>(aliases: I) -> Self
    where
        I: IntoIterator<Item = &'a (&'a str, Field)>,
    {
        let aliases = aliases
            .into_iter()
            .map(|(alias, field)| (fold_header(alias), *field))
            .collect();
        Self { aliases }
    }

    /// The table built from [`HEADER_ALIASES`].
    pub fn standard() -> &'static HeaderTable {
        static STANDARD: OnceLock<HeaderTable> = OnceLock::new();
        STANDARD.get_or_init(|| HeaderTable::new(HEADER_ALIASES))
    }

    /// Resolves a raw header to its canonical field.
    pub fn resolve(&self, raw: &str) -> Option<Field> {
        self.aliases.get(&fold_header(raw)).copied()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

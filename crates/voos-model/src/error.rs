use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown canonical field: {0}")]
    UnknownField(String),
    #[error("unknown filter key: {0}")]
    UnknownFilterKey(String),
    #[error("unknown periodo value: {0} (expected 7d, 30d, this_year or last_year)")]
    UnknownPeriodo(String),
    #[error("invalid month: {0} (expected 1-12)")]
    InvalidMonth(String),
    #[error("unknown situacao: {0}")]
    UnknownSituacao(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

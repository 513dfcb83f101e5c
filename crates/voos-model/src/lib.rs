//! Canonical data model for official-flight logs.
//!
//! - **field**: the fixed canonical column set
//! - **header**: the rename table mapping source header spellings to fields
//! - **record**: passenger-grain and flight-grain records
//! - **filter**: the filter specification served by the filter engine
//! - **fallback**: named parse-or-default policies for text fields

pub mod error;
pub mod fallback;
pub mod field;
pub mod filter;
pub mod header;
pub mod record;

pub use error::{ModelError, Result};
pub use fallback::{DateOrExcluded, FallbackPolicy, NumericOrZero, month_component};
pub use field::Field;
pub use filter::{ALL_VALUE, Constraint, FilterKey, FilterSpec, Month, Periodo, Situacao};
pub use header::{HEADER_ALIASES, HeaderTable, canonical_column_name, fold_header};
pub use record::{FlightKey, FlightLogRecord, FlightRecord, FlightRow, derive_ano};

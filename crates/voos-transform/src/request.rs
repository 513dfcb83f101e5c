//! Filter requests and the views they produce.

use std::fmt;

use chrono::NaiveDateTime;
use tracing::info;

use voos_model::{FilterSpec, FlightRow};

use crate::filter::filter_records;

/// One user action against the filter panel.
///
/// Every request is evaluated against the current canonical snapshot, never
/// against a previously produced view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRequest {
    Apply(FilterSpec),
    /// Same as `Apply`, issued after the snapshot may have been reloaded.
    Refresh(FilterSpec),
    Clear,
}

impl FilterRequest {
    /// The spec this request filters with; `Clear` has none.
    pub fn spec(&self) -> Option<&FilterSpec> {
        match self {
            FilterRequest::Apply(spec) | FilterRequest::Refresh(spec) => Some(spec),
            FilterRequest::Clear => None,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, FilterRequest::Clear)
    }
}

/// Outcome shown to the user after a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStatus {
    Filtered(usize),
    Cleared(usize),
}

impl FilterStatus {
    pub fn count(self) -> usize {
        match self {
            FilterStatus::Filtered(count) | FilterStatus::Cleared(count) => count,
        }
    }
}

impl fmt::Display for FilterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStatus::Filtered(count) => write!(f, "Filtrado — {count} registros"),
            FilterStatus::Cleared(count) => write!(f, "Filtros limpos — {count} registros"),
        }
    }
}

/// Records produced by one request, with its status line.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<R> {
    pub records: Vec<R>,
    pub status: FilterStatus,
}

impl<R> FilteredView<R> {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Evaluates a request against a snapshot.
///
/// `Clear` returns every row, regardless of any spec applied before.
pub fn run_request<R>(records: &[R], request: &FilterRequest, now: NaiveDateTime) -> FilteredView<R>
where
    R: FlightRow + Clone,
{
    let view = match request.spec() {
        Some(spec) => {
            let outcome = filter_records(records, spec, now);
            FilteredView {
                status: FilterStatus::Filtered(outcome.count),
                records: outcome.records,
            }
        }
        None => FilteredView {
            status: FilterStatus::Cleared(records.len()),
            records: records.to_vec(),
        },
    };
    info!(status = %view.status, "filter request served");
    view
}

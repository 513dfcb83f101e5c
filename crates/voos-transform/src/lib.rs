//! Query-time operations over the canonical flight-log dataset.
//!
//! - **dataset**: the immutable dataset and its swappable shared handle
//! - **aggregate**: passenger rows to flight rows
//! - **filter**: conjunctive filtering anchored at an injectable "now"
//! - **request**: Apply / Refresh / Clear requests and their status lines
//! - **views**: summary cards, destination ranking, hours per year, filter options
//! - **frame**: polars frames over record slices and CSV export

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod frame;
pub mod request;
pub mod views;

pub use aggregate::aggregate_flights;
pub use dataset::{Dataset, DatasetHandle, DatasetMeta};
pub use error::{Result, TransformError};
pub use filter::{FilterOutcome, filter_records, filter_records_now, matches_spec};
pub use frame::{flight_frame, passenger_frame, write_frame_csv};
pub use request::{FilterRequest, FilterStatus, FilteredView, run_request};
pub use views::{
    DEFAULT_TOP_DESTINATIONS, DestinationCount, FilterOptions, SummaryCards, YearHours,
    destination_ranking, hours_by_year, simple_destination,
};

//! CLI library components for the flight-log tool.

pub mod logging;
pub mod report;
pub mod summary;

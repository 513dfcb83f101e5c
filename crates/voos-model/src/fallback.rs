//! Fallback policies for fields that are carried as text.
//!
//! Source files never guarantee well-formed numbers or dates, and one bad row
//! must not fail a query over the whole dataset. Each policy names the safe
//! value a malformed field degrades to.

use chrono::NaiveDate;

/// Parses raw text under a named fallback rule.
pub trait FallbackPolicy {
    type Output;

    fn apply(raw: &str) -> Self::Output;
}

/// Non-negative decimal, anything else becomes `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct NumericOrZero;

impl FallbackPolicy for NumericOrZero {
    type Output = f64;

    fn apply(raw: &str) -> f64 {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            _ => 0.0,
        }
    }
}

/// `dd/mm/yyyy` calendar date, anything else is `None` and drops out of
/// date-window filters.
#[derive(Debug, Clone, Copy)]
pub struct DateOrExcluded;

impl FallbackPolicy for DateOrExcluded {
    type Output = Option<NaiveDate>;

    fn apply(raw: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = raw.split('/').collect();
        let [day, month, year] = parts.as_slice() else {
            return None;
        };
        let day = day.trim().parse::<u32>().ok()?;
        let month = month.trim().parse::<u32>().ok()?;
        let year = year.trim().parse::<i32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Returns the second `/`-separated component of a `dd/mm/yyyy` value, or
/// an empty string when there is none.
pub fn month_component(data: &str) -> &str {
    data.split('/').nth(1).unwrap_or("")
}

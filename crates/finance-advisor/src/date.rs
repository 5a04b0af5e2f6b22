//! Calendar date normalization for tool arguments.

use chrono::NaiveDate;

use crate::error::{AdvisorError, Result};

/// Canonical date layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a trimmed `YYYY-MM-DD` calendar date
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| AdvisorError::InvalidDate(input.to_string()))
}

/// Canonical `YYYY-MM-DD` form of `input`, or `None` when it is absent,
/// blank, or not a valid calendar date.
pub fn normalize_date(input: Option<&str>) -> Option<String> {
    let trimmed = input?.trim();
    if trimmed.is_empty() {
        return None;
    }

    parse_calendar_date(trimmed)
        .ok()
        .map(|date| date.format(DATE_FORMAT).to_string())
}

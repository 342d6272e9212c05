use chrono::{DateTime, NaiveDate};

use crate::consts::{DATE_FORMAT, DISPLAY_DATE_FORMAT, INVALID_DATE};
use crate::error::AppError;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let s = s.trim();
    // Try YYYYMMDD
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Render a date as "Jan 5, 2025" (English month abbreviations, no padding)
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Like [`format_date`] but for raw text; unparsable input yields "Invalid Date".
///
/// Accepts a bare date or an RFC 3339 timestamp (the date part is kept as written).
pub(crate) fn format_date_input(input: &str) -> String {
    if let Ok(date) = parse_date(input) {
        return format_date(date);
    }
    match DateTime::parse_from_rfc3339(input.trim()) {
        Ok(dt) => format_date(dt.date_naive()),
        Err(_) => INVALID_DATE.to_string(),
    }
}

//! Date <-> position transforms.
//!
//! Both directions work in whole days. Neither clamps: a date outside
//! `[start, end]` maps to a position outside `[0, width]` and vice versa,
//! so callers can extrapolate past either edge. Callers that draw must
//! clamp themselves.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::consts::DEFAULT_TIMELINE_WIDTH;
use crate::error::AppError;

/// Offset of `date` along a timeline `width` units wide spanning `start..=end`.
///
/// Fails when `start == end` or `width` is not a positive finite number.
pub(crate) fn date_to_position(
    date: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
    width: f64,
) -> Result<f64, AppError> {
    let total_days = checked_span(start, end, width)?;
    Ok(linear_position((date - start).num_days(), total_days, width))
}

/// Inverse of [`date_to_position`], rounded to the nearest whole day.
pub(crate) fn position_to_date(
    position: f64,
    start: NaiveDate,
    end: NaiveDate,
    width: f64,
) -> Result<NaiveDate, AppError> {
    let total_days = checked_span(start, end, width)?;
    linear_date(position, start, total_days, width)
}

fn checked_span(start: NaiveDate, end: NaiveDate, width: f64) -> Result<i64, AppError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(AppError::DegenerateTimeline {
            reason: format!("width must be a positive number, got {width}"),
        });
    }
    let total_days = (end - start).num_days();
    if total_days == 0 {
        return Err(AppError::DegenerateTimeline {
            reason: format!("start and end are both {start}"),
        });
    }
    Ok(total_days)
}

fn linear_position(days_since_start: i64, total_days: i64, width: f64) -> f64 {
    days_since_start as f64 / total_days as f64 * width
}

fn linear_date(
    position: f64,
    start: NaiveDate,
    total_days: i64,
    width: f64,
) -> Result<NaiveDate, AppError> {
    let days = (position / width * total_days as f64).round();
    let out_of_range = || AppError::PositionOutOfRange { position };
    if !days.is_finite() || days.abs() > i32::MAX as f64 {
        return Err(out_of_range());
    }
    TimeDelta::try_days(days as i64)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(out_of_range)
}

/// A validated `(start, end, width)` triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimelineRange {
    start: NaiveDate,
    end: NaiveDate,
    width: f64,
    total_days: i64,
}

impl TimelineRange {
    pub(crate) fn new(start: NaiveDate, end: NaiveDate, width: f64) -> Result<Self, AppError> {
        let total_days = checked_span(start, end, width)?;
        Ok(Self {
            start,
            end,
            width,
            total_days,
        })
    }

    /// Jan 1 through Dec 31 of `today`'s year at the default width
    pub(crate) fn calendar_year_of(today: NaiveDate) -> Self {
        let year = today.year();
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
        let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today);
        Self {
            start,
            end,
            width: DEFAULT_TIMELINE_WIDTH,
            total_days: (end - start).num_days(),
        }
    }

    /// Same span, different width
    pub(crate) fn with_width(self, width: f64) -> Result<Self, AppError> {
        Self::new(self.start, self.end, width)
    }

    pub(crate) fn start(&self) -> NaiveDate {
        self.start
    }

    pub(crate) fn end(&self) -> NaiveDate {
        self.end
    }

    pub(crate) fn width(&self) -> f64 {
        self.width
    }

    pub(crate) fn position_of(&self, date: NaiveDate) -> f64 {
        linear_position((date - self.start).num_days(), self.total_days, self.width)
    }

    /// Whether `date` lies between the two ends, whichever order they are in
    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        (lo..=hi).contains(&date)
    }
}

/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Short human-readable date: "Jan 5, 2025"
pub(crate) const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Shown in place of a date that could not be parsed
pub(crate) const INVALID_DATE: &str = "Invalid Date";

/// Name of the hosted table holding predictions
pub(crate) const PREDICTIONS_TABLE: &str = "predictions";

/// Timeline width used when nothing is configured
pub(crate) const DEFAULT_TIMELINE_WIDTH: f64 = 1000.0;

/// Upper bound of the `name` column (VARCHAR(255))
pub(crate) const MAX_NAME_LEN: usize = 255;

pub(crate) const ENV_HOME: &str = "PREDBOARD_HOME";
pub(crate) const ENV_URL: &str = "PREDBOARD_URL";
pub(crate) const ENV_KEY: &str = "PREDBOARD_KEY";

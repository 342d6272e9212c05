use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::cli::SortOrder;
use crate::consts::DATE_FORMAT;
use crate::store::Prediction;
use crate::timeline::TimelineRange;
use crate::utils::format_date;

use super::table::ordered;

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn range_json(range: &TimelineRange) -> Value {
    json!({
        "start": range.start().format(DATE_FORMAT).to_string(),
        "end": range.end().format(DATE_FORMAT).to_string(),
        "width": range.width(),
    })
}

pub(crate) fn predictions_json(
    rows: &[Prediction],
    own_session: Option<&str>,
    has_submitted: bool,
    range: &TimelineRange,
    order: SortOrder,
) -> String {
    let predictions: Vec<Value> = ordered(rows, order)
        .into_iter()
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "prediction_date": p.prediction_date.format(DATE_FORMAT).to_string(),
                "formatted": format_date(p.prediction_date),
                "created_at": p.created_at.to_rfc3339(),
                "position": range.position_of(p.prediction_date),
                "in_range": range.contains(p.prediction_date),
                "mine": own_session.is_some_and(|s| p.belongs_to(s)),
            })
        })
        .collect();
    pretty(&json!({
        "session": own_session,
        "has_submitted": has_submitted,
        "timeline": range_json(range),
        "predictions": predictions,
    }))
}

/// Result of mapping a date onto the timeline
pub(crate) fn location_json(date: NaiveDate, range: &TimelineRange) -> String {
    pretty(&json!({
        "date": date.format(DATE_FORMAT).to_string(),
        "formatted": format_date(date),
        "position": range.position_of(date),
        "in_range": range.contains(date),
        "timeline": range_json(range),
    }))
}

/// Result of mapping a position back to a date
pub(crate) fn position_json(position: f64, date: NaiveDate, range: &TimelineRange) -> String {
    pretty(&json!({
        "position": position,
        "date": date.format(DATE_FORMAT).to_string(),
        "formatted": format_date(date),
        "in_range": range.contains(date),
        "timeline": range_json(range),
    }))
}

pub(crate) fn session_json(token: &str, created: bool, path: Option<&std::path::Path>) -> String {
    pretty(&json!({
        "session": token,
        "created": created,
        "path": path.map(|p| p.display().to_string()),
    }))
}

//! Text rendering of the prediction timeline.
//!
//! The range's width is taken as a column count. Markers for dates past
//! either end are pinned to the edge and drawn as arrows.

use crate::store::Prediction;
use crate::timeline::TimelineRange;
use crate::utils::format_date;

const MARKER: char = '●';
const BEFORE: char = '◀';
const AFTER: char = '▶';

pub(crate) fn render_timeline(
    rows: &[Prediction],
    own_session: Option<&str>,
    range: &TimelineRange,
    use_color: bool,
) -> String {
    let columns = range.width().round().max(1.0) as usize;
    let line_len = columns + 1;
    let mut out = String::new();

    let start_label = format_date(range.start());
    let end_label = format_date(range.end());
    let gap = line_len
        .saturating_sub(start_label.chars().count() + end_label.chars().count())
        .max(1);
    out.push_str(&format!("{start_label}{}{end_label}\n", " ".repeat(gap)));
    out.push('├');
    out.push_str(&"─".repeat(columns.saturating_sub(1)));
    out.push_str("┤\n");

    for p in rows {
        let position = range.position_of(p.prediction_date);
        let (column, glyph) = if range.contains(p.prediction_date) {
            (position.round().clamp(0.0, columns as f64) as usize, MARKER)
        } else if position < 0.0 {
            (0, BEFORE)
        } else {
            (columns, AFTER)
        };
        let mine = own_session.is_some_and(|s| p.belongs_to(s));

        let mut lane: Vec<char> = vec![' '; line_len];
        lane[column] = glyph;
        let lane: String = lane.into_iter().collect();
        let label = format!(
            "{} ({}){}",
            p.name,
            format_date(p.prediction_date),
            if mine { " \u{2190} you" } else { "" }
        );
        if mine && use_color {
            out.push_str(&format!("\x1b[32m{lane}  {label}\x1b[0m\n"));
        } else {
            out.push_str(&format!("{lane}  {label}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn prediction(name: &str, date: NaiveDate, session: &str) -> Prediction {
        Prediction {
            id: 1,
            name: name.to_string(),
            prediction_date: date,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            user_session: Some(session.to_string()),
        }
    }

    fn marker_column(line: &str) -> usize {
        line.chars()
            .position(|c| c == MARKER || c == BEFORE || c == AFTER)
            .unwrap()
    }

    #[test]
    fn markers_land_on_mapped_columns() {
        let range = TimelineRange::new(ymd(2025, 1, 1), ymd(2025, 12, 31), 52.0).unwrap();
        let rows = vec![
            prediction("start", ymd(2025, 1, 1), "a"),
            prediction("mid", ymd(2025, 7, 2), "b"),
            prediction("end", ymd(2025, 12, 31), "c"),
        ];
        let out = render_timeline(&rows, None, &range, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Jan 1, 2025"));
        assert!(lines[0].ends_with("Dec 31, 2025"));
        assert_eq!(lines[1].chars().count(), 53);
        assert_eq!(marker_column(lines[2]), 0);
        assert_eq!(marker_column(lines[3]), 26);
        assert_eq!(marker_column(lines[4]), 52);
    }

    #[test]
    fn out_of_range_dates_pin_to_edges() {
        let range = TimelineRange::new(ymd(2025, 1, 1), ymd(2025, 12, 31), 40.0).unwrap();
        let rows = vec![
            prediction("early", ymd(2024, 6, 1), "a"),
            prediction("late", ymd(2027, 6, 1), "b"),
        ];
        let out = render_timeline(&rows, None, &range, false);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].starts_with(BEFORE));
        assert_eq!(marker_column(lines[3]), 40);
        assert!(lines[3].contains(AFTER));
    }

    #[test]
    fn own_row_is_labelled() {
        let range = TimelineRange::new(ymd(2025, 1, 1), ymd(2025, 12, 31), 20.0).unwrap();
        let rows = vec![prediction("Ada", ymd(2025, 3, 3), "me")];
        let plain = render_timeline(&rows, Some("me"), &range, false);
        assert!(plain.contains("Ada (Mar 3, 2025) \u{2190} you"));
        let colored = render_timeline(&rows, Some("me"), &range, true);
        assert!(colored.contains("\x1b[32m"));
    }
}

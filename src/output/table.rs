use comfy_table::Color;

use crate::cli::SortOrder;
use crate::store::Prediction;
use crate::timeline::TimelineRange;
use crate::utils::{Timezone, format_date};

use super::format::{create_styled_table, format_position, header_cell, right_cell, styled_cell};

#[derive(Debug, Clone, Copy)]
pub(crate) struct PredictionTableOptions {
    pub(crate) order: SortOrder,
    pub(crate) use_color: bool,
    pub(crate) timezone: Timezone,
}

/// Rows in display order; input is already sorted ascending
pub(super) fn ordered(rows: &[Prediction], order: SortOrder) -> Vec<&Prediction> {
    match order {
        SortOrder::Asc => rows.iter().collect(),
        SortOrder::Desc => rows.iter().rev().collect(),
    }
}

pub(crate) fn print_predictions_table(
    rows: &[Prediction],
    own_session: Option<&str>,
    range: &TimelineRange,
    opts: PredictionTableOptions,
) {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", c),
        header_cell("Name", c),
        header_cell("Prediction", c),
        header_cell("Position", c),
        header_cell("Submitted", c),
    ]);

    for (i, p) in ordered(rows, opts.order).into_iter().enumerate() {
        let mine = own_session.is_some_and(|s| p.belongs_to(s));
        let highlight = if mine && c { Some(Color::Green) } else { None };
        let name = if mine {
            format!("{} (you)", p.name)
        } else {
            p.name.clone()
        };
        let position = format_position(range.position_of(p.prediction_date));
        let position_color = if !range.contains(p.prediction_date) && c {
            Some(Color::DarkGrey)
        } else {
            None
        };
        table.add_row(vec![
            right_cell(&(i + 1).to_string(), None, false),
            styled_cell(&name, highlight, mine),
            styled_cell(&format_date(p.prediction_date), highlight, false),
            right_cell(&position, position_color, false),
            styled_cell(&opts.timezone.format_timestamp(p.created_at), None, false),
        ]);
    }

    println!(
        "\n  Predictions on {} \u{2192} {} ({} wide)\n",
        format_date(range.start()),
        format_date(range.end()),
        format_position(range.width())
    );
    println!("{table}");
}

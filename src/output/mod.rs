mod format;
mod json;
mod table;
mod timeline;

pub(crate) use json::{location_json, position_json, predictions_json, session_json};
pub(crate) use table::{PredictionTableOptions, print_predictions_table};
pub(crate) use timeline::render_timeline;

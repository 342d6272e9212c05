//! CLI subcommand definitions

use clap::Subcommand;

/// Narrowest and widest text timeline, in columns
const MIN_COLUMNS: i64 = 10;
const MAX_COLUMNS: i64 = 500;

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Commands {
    /// List every prediction (default)
    List,
    /// Draw predictions on a text timeline
    Timeline {
        /// Timeline width in terminal columns
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(i64).range(MIN_COLUMNS..=MAX_COLUMNS))]
        columns: i64,
    },
    /// Submit this session's prediction (one per session)
    Submit {
        /// Your name
        #[arg(short, long)]
        name: String,
        /// Predicted date (YYYYMMDD or YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },
    /// Print where a date falls on the timeline
    Locate {
        /// Date to place (YYYYMMDD or YYYY-MM-DD)
        date: String,
    },
    /// Print the date at a timeline position
    At {
        /// Offset along the timeline; values outside 0..=width extrapolate
        #[arg(allow_negative_numbers = true)]
        position: f64,
    },
    /// Print a date in short form ("Jan 5, 2025"); unparsable input prints "Invalid Date"
    Format {
        /// Date or RFC 3339 timestamp
        date: String,
    },
    /// Show the session id used for submissions
    Session {
        /// Discard the cached id and start a new session
        #[arg(long)]
        new: bool,
    },
}

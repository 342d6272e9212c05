//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::Local;
use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigSortOrder};
use crate::error::AppError;
use crate::timeline::TimelineRange;
use crate::utils::{SessionScheme, parse_date};

use super::commands::Commands;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum SortOrder {
    /// Earliest predicted date first (default)
    #[default]
    Asc,
    /// Latest predicted date first
    Desc,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "predboard")]
#[command(about = "One date prediction per session, everyone's predictions on a timeline", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Database base URL (overrides PREDBOARD_URL and config)
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) url: Option<String>,

    /// Database access key (overrides PREDBOARD_KEY and config)
    #[arg(long, global = true, value_name = "KEY")]
    pub(crate) key: Option<String>,

    /// Timeline start date (YYYYMMDD or YYYY-MM-DD; default Jan 1 this year)
    #[arg(long, global = true)]
    pub(crate) start: Option<String>,

    /// Timeline end date (YYYYMMDD or YYYY-MM-DD; default Dec 31 this year)
    #[arg(long, global = true)]
    pub(crate) end: Option<String>,

    /// Timeline width (default 1000)
    #[arg(short, long, global = true)]
    pub(crate) width: Option<f64>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Sort order for results [default: asc]
    #[arg(short, long, global = true, value_enum)]
    pub(crate) order: Option<SortOrder>,

    /// Color output mode [default: auto]
    #[arg(long, global = true, value_enum)]
    pub(crate) color: Option<ColorMode>,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug output (requests, cache, state changes)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Timezone for submission timestamps (e.g., "Asia/Shanghai", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    #[arg(skip)]
    pub(crate) session_scheme: SessionScheme,

    #[arg(skip)]
    pub(crate) timeout: Option<Duration>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        // Enum values only apply when the flag was not given at all
        if self.order.is_none() {
            self.order = config.order.map(|order| match order {
                ConfigSortOrder::Asc => SortOrder::Asc,
                ConfigSortOrder::Desc => SortOrder::Desc,
            });
        }
        if self.color.is_none() {
            self.color = config.color.map(|color| match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            });
        }

        // String options: only apply if CLI didn't set them
        if self.url.is_none() {
            self.url = config.url.clone();
        }
        if self.key.is_none() {
            self.key = config.key.clone();
        }
        if self.start.is_none() {
            self.start = config.start.clone();
        }
        if self.end.is_none() {
            self.end = config.end.clone();
        }
        if self.width.is_none() {
            self.width = config.width;
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }

        if let Some(scheme) = config.session_scheme {
            self.session_scheme = scheme;
        }
        self.timeout = config.timeout_secs.map(Duration::from_secs);

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color.unwrap_or_default() {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn sort_order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Timeline from `--start/--end/--width`; unset ends default to this
    /// calendar year.
    pub(crate) fn timeline(&self) -> Result<TimelineRange, AppError> {
        let year = TimelineRange::calendar_year_of(Local::now().date_naive());
        let start = match &self.start {
            Some(s) => parse_date(s)?,
            None => year.start(),
        };
        let end = match &self.end {
            Some(s) => parse_date(s)?,
            None => year.end(),
        };
        TimelineRange::new(start, end, self.width.unwrap_or(year.width()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["predboard"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn cli_flags_beat_config() {
        let config = Config {
            url: Some("https://config.example".to_string()),
            width: Some(300.0),
            order: Some(ConfigSortOrder::Desc),
            session_scheme: Some(SessionScheme::Uuid),
            timeout_secs: Some(3),
            ..Config::default()
        };
        let cli = parse(&["--url", "https://cli.example", "list"]).with_config(&config);
        assert_eq!(cli.url.as_deref(), Some("https://cli.example"));
        assert_eq!(cli.width, Some(300.0));
        assert_eq!(cli.sort_order(), SortOrder::Desc);
        assert_eq!(cli.session_scheme, SessionScheme::Uuid);
        assert_eq!(cli.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn timeline_from_flags() {
        let cli = parse(&["--start", "2025-01-01", "--end", "20251231", "-w", "500", "list"]);
        let range = cli.timeline().unwrap();
        assert_eq!(range.width(), 500.0);
        assert_eq!(range.end().to_string(), "2025-12-31");
    }

    #[test]
    fn timeline_rejects_equal_ends() {
        let cli = parse(&["--start", "2025-01-01", "--end", "2025-01-01"]);
        assert!(matches!(
            cli.timeline(),
            Err(AppError::DegenerateTimeline { .. })
        ));
    }

    #[test]
    fn negative_position_parses() {
        let cli = parse(&["at", "-25.5"]);
        assert!(matches!(cli.command, Some(Commands::At { position }) if position == -25.5));
    }

    #[test]
    fn explicit_defaults_beat_config() {
        let config = Config {
            order: Some(ConfigSortOrder::Desc),
            color: Some(ConfigColorMode::Always),
            ..Config::default()
        };
        let cli = parse(&["--order", "asc", "--color", "never"]).with_config(&config);
        assert_eq!(cli.sort_order(), SortOrder::Asc);
        assert!(!cli.use_color());

        let cli = parse(&["--color", "auto"]).with_config(&config);
        assert_eq!(cli.color, Some(ColorMode::Auto));
        assert_eq!(cli.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn unset_flags_fall_back_to_defaults() {
        let cli = parse(&[]).with_config(&Config::default());
        assert_eq!(cli.sort_order(), SortOrder::Asc);
        assert_eq!(cli.color, None);
    }

    #[test]
    fn no_color_wins() {
        let cli = parse(&["--color", "always", "--no-color"]);
        assert!(!cli.use_color());
    }

    #[test]
    fn columns_are_bounded() {
        let argv = ["predboard", "timeline", "--columns", "3"];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Degenerate timeline: {reason}")]
    DegenerateTimeline { reason: String },

    #[error("Position {position} does not map to a representable date")]
    PositionOutOfRange { position: f64 },

    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    #[error("No database URL configured (set --url, PREDBOARD_URL or `url` in config.toml)")]
    MissingUrl,

    #[error("No access key configured (set --key, PREDBOARD_KEY or `key` in config.toml)")]
    MissingKey,

    #[error("No session id has been assigned yet")]
    NoSession,

    #[error("Failed to write session cache {path}: {source}")]
    SessionCache {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Failures talking to the hosted predictions table.
///
/// The controller only needs to tell "this session already has a row"
/// apart from everything else; the remaining variants exist for messages.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("This session has already submitted a prediction")]
    AlreadySubmitted,

    #[error("Request failed: {0}")]
    Transient(String),

    #[error("Service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl StoreError {
    pub(crate) fn is_already_submitted(&self) -> bool {
        matches!(self, StoreError::AlreadySubmitted)
    }

    pub(crate) fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

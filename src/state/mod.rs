//! Observable per-session state.
//!
//! The three cells are independent: nothing orders a write to one
//! relative to a write to another.

mod cell;

pub(crate) use cell::Observable;

use crate::store::Prediction;

/// Everything the front end knows about the current session
#[derive(Default)]
pub(crate) struct SessionState {
    /// Token identifying this session, `None` until one is assigned
    pub(crate) user_session: Observable<Option<String>>,
    /// Whether a prediction from this session is known to exist
    pub(crate) has_submitted: Observable<bool>,
    /// Last fetched predictions, ordered by predicted date
    pub(crate) predictions: Observable<Vec<Prediction>>,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

//! The hosted `predictions` table and the locally cached session token

mod rest;
mod session_cache;
mod types;

pub(crate) use rest::RestStore;
pub(crate) use session_cache::SessionCache;
pub(crate) use types::{NewPrediction, Prediction, sort_predictions};

use crate::error::StoreError;

/// Row access to the predictions table.
///
/// Uniqueness of `user_session` is enforced by the service; an insert that
/// violates it must come back as [`StoreError::AlreadySubmitted`].
pub(crate) trait PredictionStore {
    /// All rows, ordered by predicted date
    fn fetch_all(&self) -> Result<Vec<Prediction>, StoreError>;

    /// Insert one row and return it as stored (with `id` and `created_at`)
    fn insert(&self, prediction: &NewPrediction) -> Result<Prediction, StoreError>;
}

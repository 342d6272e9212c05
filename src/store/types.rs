use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::MAX_NAME_LEN;
use crate::error::AppError;

/// One row of the predictions table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Prediction {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) prediction_date: NaiveDate,
    pub(crate) created_at: DateTime<Utc>,
    /// Nullable in the schema; rows inserted by this client always carry one
    #[serde(default)]
    pub(crate) user_session: Option<String>,
}

impl Prediction {
    pub(crate) fn belongs_to(&self, session: &str) -> bool {
        self.user_session.as_deref() == Some(session)
    }
}

/// Insert payload; the service assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct NewPrediction {
    name: String,
    prediction_date: NaiveDate,
    user_session: String,
}

impl NewPrediction {
    pub(crate) fn new(
        name: &str,
        prediction_date: NaiveDate,
        user_session: &str,
    ) -> Result<Self, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidName {
                reason: "name must not be empty".to_string(),
            });
        }
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(AppError::InvalidName {
                reason: format!("{len} characters, at most {MAX_NAME_LEN} allowed"),
            });
        }
        Ok(Self {
            name: name.to_string(),
            prediction_date,
            user_session: user_session.to_string(),
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn prediction_date(&self) -> NaiveDate {
        self.prediction_date
    }

    pub(crate) fn user_session(&self) -> &str {
        &self.user_session
    }
}

/// Predictions sort by predicted date, ties broken by submission time
pub(crate) fn sort_predictions(predictions: &mut [Prediction]) {
    predictions.sort_by(|a, b| {
        a.prediction_date
            .cmp(&b.prediction_date)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

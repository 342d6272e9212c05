//! PostgREST client for the predictions table.
//!
//! The service exposes the table at `{url}/rest/v1/predictions`; every
//! request carries the anon key both as `apikey` and as a bearer token.

use std::time::Duration;

use serde::Deserialize;

use crate::consts::PREDICTIONS_TABLE;
use crate::error::StoreError;
use crate::utils::debug_log;

use super::{NewPrediction, Prediction, PredictionStore};

/// Postgres error code for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

pub(crate) struct RestStore {
    agent: ureq::Agent,
    table_url: String,
    key: String,
}

/// Error body returned by PostgREST
#[derive(Debug, Default, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RestStore {
    pub(crate) fn new(url: &str, key: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            table_url: table_url(url),
            key: key.to_string(),
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.key)
    }
}

impl PredictionStore for RestStore {
    fn fetch_all(&self) -> Result<Vec<Prediction>, StoreError> {
        let url = format!("{}?select=*&order=prediction_date.asc", self.table_url);
        debug_log!("GET {url}");
        let response = self
            .agent
            .get(&url)
            .header("apikey", self.key.as_str())
            .header("Authorization", self.bearer())
            .header("Accept", "application/json")
            .call()
            .map_err(transport_error)?;
        let body = read_success(response)?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn insert(&self, prediction: &NewPrediction) -> Result<Prediction, StoreError> {
        debug_log!(
            "POST {} ({} on {}, session {})",
            self.table_url,
            prediction.name(),
            prediction.prediction_date(),
            prediction.user_session()
        );
        let response = self
            .agent
            .post(&self.table_url)
            .header("apikey", self.key.as_str())
            .header("Authorization", self.bearer())
            .header("Prefer", "return=representation")
            .send_json(prediction)
            .map_err(transport_error)?;
        let body = read_success(response)?;
        let rows: Vec<Prediction> =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }
}

fn table_url(base: &str) -> String {
    format!(
        "{}/rest/v1/{}",
        base.trim().trim_end_matches('/'),
        PREDICTIONS_TABLE
    )
}

fn read_success(response: ureq::http::Response<ureq::Body>) -> Result<String, StoreError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();
    let text = body.read_to_string().map_err(transport_error)?;
    debug_log!("HTTP {status}, {} bytes", text.len());
    if (200..300).contains(&status) {
        Ok(text)
    } else {
        Err(classify_failure(status, &text))
    }
}

fn transport_error(err: ureq::Error) -> StoreError {
    match err {
        ureq::Error::StatusCode(status) => classify_failure(status, ""),
        other => StoreError::Transient(other.to_string()),
    }
}

/// Map a non-2xx response onto the caller-visible failure kinds
fn classify_failure(status: u16, body: &str) -> StoreError {
    let parsed: ServiceError = serde_json::from_str(body).unwrap_or_default();
    if status == 409 || parsed.code.as_deref() == Some(UNIQUE_VIOLATION) {
        return StoreError::AlreadySubmitted;
    }
    let message = parsed
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    if status >= 500 || status == 408 || status == 429 {
        StoreError::Transient(format!("HTTP {status}: {message}"))
    } else {
        StoreError::Rejected { status, message }
    }
}

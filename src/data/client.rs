//! HTTP client for the QA calculation backend.
//!
//! The backend owns all dosimetry/physics math; this client only ships form
//! payloads to it and hands parsed JSON back. One POST per submission, no
//! retries, no timeout beyond the platform's own.

use reqwest::blocking::Client;
use serde_json::{Map, Value};

use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Fixed user-facing message for any failed calculation request.
///
/// Transport errors, non-success statuses, and bad response bodies all
/// surface identically; no detail is passed through.
pub const CALCULATION_FAILED: &str = "Calculation failed";

pub struct QaClient {
    client: Client,
    base_url: String,
}

impl QaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Base URL from `LINQA_BASE_URL` (via `.env` when present), with an
    /// explicit override taking precedence.
    pub fn from_env(override_url: Option<String>) -> Self {
        dotenvy::dotenv().ok();
        let base_url = override_url
            .or_else(|| std::env::var("LINQA_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a submission payload to one check endpoint and parse the JSON
    /// response body.
    pub fn post_check(&self, endpoint: &str, payload: &Map<String, Value>) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let resp = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .map_err(|_| AppError::new(4, CALCULATION_FAILED))?;

        if !resp.status().is_success() {
            return Err(AppError::new(4, CALCULATION_FAILED));
        }

        resp.json().map_err(|_| AppError::new(4, CALCULATION_FAILED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_from_the_base_url() {
        let client = QaClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}

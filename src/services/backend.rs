//! HTTP client for the remote receipt classification service.
//!
//! The service exposes two endpoints:
//!
//! - `POST /classify` with a multipart image upload, answering either
//!   `{"summary": {category: amount, ...}}` or `{"error": "message"}`
//! - `GET /dashboard`, answering a flat `{category: amount, ...}` object
//!
//! Failures are split into two kinds. A structured rejection is a message the
//! backend itself produced for the user and is surfaced verbatim. Everything
//! else (connection errors, non-success statuses, replies that do not match
//! the contract) is a transport failure whose detail is only logged.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{ExpenseBreakdown, StagedReceipt, RECEIPT_FIELD};

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a structured error message meant for the user.
    #[error("{0}")]
    Rejected(String),
    /// Network failure, non-success status, or a reply outside the contract.
    #[error("{0}")]
    Transport(String),
}

/// Reply shape of `POST /classify`. Exactly one of the two fields is expected;
/// unknown fields such as `message` are ignored.
#[derive(Debug, Deserialize)]
struct ClassifyReply {
    summary: Option<BTreeMap<String, f64>>,
    error: Option<String>,
}

/// Create an HTTP client with appropriate timeout
fn create_client() -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            client: create_client()?,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a receipt image for classification.
    pub async fn classify(&self, receipt: &StagedReceipt) -> Result<ExpenseBreakdown, BackendError> {
        let url = format!("{}/classify", self.base_url);

        let mut part = Part::stream(Body::from(receipt.bytes.clone()))
            .file_name(receipt.file_name.clone());
        if !receipt.content_type.is_empty() {
            part = part.mime_str(&receipt.content_type).map_err(|e| {
                BackendError::Transport(format!(
                    "Unusable content type '{}': {}",
                    receipt.content_type, e
                ))
            })?;
        }
        let form = Form::new().part(RECEIPT_FIELD, part);

        debug!(file_name = %receipt.file_name, size_bytes = receipt.size_bytes(), "Sending receipt to classifier");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("Classifier request failed: {}", e)))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            BackendError::Transport(format!("Failed to read classifier response: {}", e))
        })?;

        decode_classify_reply(status, &body)
    }

    /// Fetch the aggregate per-category totals for the dashboard.
    pub async fn fetch_dashboard(&self) -> Result<ExpenseBreakdown, BackendError> {
        let url = format!("{}/dashboard", self.base_url);

        debug!("Fetching expense dashboard from classifier");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("Dashboard request failed: {}", e)))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            BackendError::Transport(format!("Failed to read dashboard response: {}", e))
        })?;

        decode_dashboard_reply(status, &body)
    }
}

fn decode_classify_reply(status: StatusCode, body: &[u8]) -> Result<ExpenseBreakdown, BackendError> {
    if !status.is_success() {
        return Err(BackendError::Transport(format!(
            "Classifier returned {}: {}",
            status,
            String::from_utf8_lossy(body)
        )));
    }

    let reply: ClassifyReply = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Failed to parse classifier response as JSON");
        BackendError::Transport(format!("Failed to parse classifier response: {}", e))
    })?;

    if let Some(message) = reply.error {
        return Err(BackendError::Rejected(message));
    }

    let summary = reply.summary.ok_or_else(|| {
        BackendError::Transport("Classifier reply carried neither summary nor error".to_string())
    })?;

    ExpenseBreakdown::from_map(summary)
        .map_err(|e| BackendError::Transport(format!("Classifier reply rejected: {}", e)))
}

fn decode_dashboard_reply(status: StatusCode, body: &[u8]) -> Result<ExpenseBreakdown, BackendError> {
    if !status.is_success() {
        return Err(BackendError::Transport(format!(
            "Dashboard returned {}: {}",
            status,
            String::from_utf8_lossy(body)
        )));
    }

    let totals: BTreeMap<String, f64> = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Failed to parse dashboard response as JSON");
        BackendError::Transport(format!("Failed to parse dashboard response: {}", e))
    })?;

    ExpenseBreakdown::from_map(totals)
        .map_err(|e| BackendError::Transport(format!("Dashboard reply rejected: {}", e)))
}

//! Upload interaction state: one staged receipt and one classification flow.
//!
//! The controller is the single owner of upload state. Handlers feed it user
//! actions (select, submit) and render whatever snapshot it reports; they
//! never mutate state themselves. At most one classification request is in
//! flight at a time, tracked by a flag that only settlement clears, so
//! re-selecting a file mid-flight cannot start a second request.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{ExpenseBreakdown, StagedReceipt};
use crate::services::backend::{BackendClient, BackendError};

/// Shown when a submit happens with no receipt staged.
pub const MISSING_RECEIPT_MESSAGE: &str = "Please upload a receipt image.";
/// Shown when classification fails for a reason the user cannot act on.
pub const CLASSIFY_FAILED_MESSAGE: &str = "Failed to classify receipt. Please try again.";

/// Where the upload flow currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    /// Nothing picked yet.
    Idle,
    /// A receipt is staged and ready to submit.
    Selected,
    /// A classification request is running.
    InFlight,
    /// The backend classified the staged receipt.
    Succeeded(ExpenseBreakdown),
    /// Validation or classification failed; the message is user-facing.
    Failed(String),
}

impl UploadState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, UploadState::InFlight)
    }
}

/// Consistent view of the controller, taken under one lock.
#[derive(Debug, Clone)]
pub struct UploadSnapshot {
    pub state: UploadState,
    pub file_name: Option<String>,
    pub in_flight: bool,
}

#[derive(Debug)]
struct UploadInner {
    state: UploadState,
    receipt: Option<StagedReceipt>,
    in_flight: bool,
    live: bool,
}

pub struct UploadController {
    backend: Arc<BackendClient>,
    inner: Arc<Mutex<UploadInner>>,
}

impl UploadController {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self {
            backend,
            inner: Arc::new(Mutex::new(UploadInner {
                state: UploadState::Idle,
                receipt: None,
                in_flight: false,
                live: true,
            })),
        }
    }

    pub fn state(&self) -> UploadState {
        self.lock().state.clone()
    }

    pub fn snapshot(&self) -> UploadSnapshot {
        let inner = self.lock();
        UploadSnapshot {
            state: inner.state.clone(),
            file_name: inner.receipt.as_ref().map(|r| r.file_name.clone()),
            in_flight: inner.in_flight,
        }
    }

    /// Stage a receipt for classification. Valid in every state: replaces any
    /// previously staged file and clears a prior error or result. Does not
    /// interrupt a request already in flight.
    pub fn select_file(&self, receipt: StagedReceipt) -> UploadState {
        let mut inner = self.lock();
        debug!(file_name = %receipt.file_name, size_bytes = receipt.size_bytes(), "Receipt staged");
        if !receipt.is_image() {
            debug!(content_type = %receipt.content_type, "Staged file does not look like a receipt photo");
        }
        inner.receipt = Some(receipt);
        inner.state = UploadState::Selected;
        inner.state.clone()
    }

    /// Submit the staged receipt for classification and wait for the outcome.
    ///
    /// A submit with nothing staged fails locally without touching the
    /// network. A submit while another classification is in flight is
    /// ignored. The request itself runs on a spawned task, so an abandoned
    /// caller cannot strand the controller mid-flight.
    pub async fn submit(&self) -> UploadState {
        let receipt = {
            let mut inner = self.lock();
            if inner.in_flight {
                debug!("Ignoring submit while a classification is already in flight");
                return inner.state.clone();
            }
            match inner.receipt.clone() {
                Some(receipt) => {
                    inner.in_flight = true;
                    inner.state = UploadState::InFlight;
                    receipt
                }
                None => {
                    debug!("Submit without a staged receipt");
                    inner.state = UploadState::Failed(MISSING_RECEIPT_MESSAGE.to_string());
                    return inner.state.clone();
                }
            }
        };

        let upload_id = Uuid::new_v4().to_string();
        info!(upload_id = %upload_id, file_name = %receipt.file_name, "Starting receipt classification");

        let backend = Arc::clone(&self.backend);
        let inner_clone = Arc::clone(&self.inner);
        let upload_id_clone = upload_id.clone();
        let task = tokio::spawn(async move {
            let outcome = backend.classify(&receipt).await;
            settle(&inner_clone, &upload_id_clone, outcome)
        });

        match task.await {
            Ok(state) => state,
            Err(e) => {
                warn!(upload_id = %upload_id, error = %e, "Classification task aborted");
                let mut inner = self.lock();
                inner.in_flight = false;
                if inner.live && inner.state.is_in_flight() {
                    inner.state = UploadState::Failed(CLASSIFY_FAILED_MESSAGE.to_string());
                }
                inner.state.clone()
            }
        }
    }

    /// Mark the controller as torn down. A settlement arriving afterwards is
    /// discarded instead of mutating dead state.
    pub fn detach(&self) {
        let mut inner = self.lock();
        inner.live = false;
        debug!("Upload controller detached");
    }

    fn lock(&self) -> MutexGuard<'_, UploadInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn settle(
    inner: &Mutex<UploadInner>,
    upload_id: &str,
    outcome: Result<ExpenseBreakdown, BackendError>,
) -> UploadState {
    let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
    inner.in_flight = false;
    if !inner.live {
        debug!(upload_id = %upload_id, "Dropping settlement for a detached controller");
        return inner.state.clone();
    }
    inner.state = match outcome {
        Ok(breakdown) => {
            info!(upload_id = %upload_id, categories = breakdown.len(), "Receipt classified");
            UploadState::Succeeded(breakdown)
        }
        Err(BackendError::Rejected(message)) => {
            info!(upload_id = %upload_id, message = %message, "Classifier rejected the receipt");
            UploadState::Failed(message)
        }
        Err(BackendError::Transport(detail)) => {
            warn!(upload_id = %upload_id, detail = %detail, "Classification failed in transport");
            UploadState::Failed(CLASSIFY_FAILED_MESSAGE.to_string())
        }
    };
    inner.state.clone()
}

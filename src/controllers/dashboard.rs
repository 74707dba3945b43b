//! Dashboard interaction state: one aggregate fetch per mount.
//!
//! Every page view mounts a fresh controller, fetches the aggregate totals
//! once, and renders the outcome. All failures collapse to one user-facing
//! message; whatever detail exists goes to the log instead.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::models::ExpenseBreakdown;
use crate::services::backend::{BackendClient, BackendError};

/// Shown whenever the aggregate totals cannot be loaded.
pub const DASHBOARD_FAILED_MESSAGE: &str = "Failed to load dashboard data.";

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    /// The fetch has not settled yet.
    Loading,
    /// Totals arrived and at least one category has spend.
    Succeeded(ExpenseBreakdown),
    /// Totals arrived but nothing has been recorded yet.
    Empty,
    /// The fetch failed; the message is user-facing.
    Failed(String),
}

#[derive(Debug)]
struct DashboardInner {
    state: DashboardState,
    fetching: bool,
    live: bool,
}

pub struct DashboardController {
    backend: Arc<BackendClient>,
    inner: Arc<Mutex<DashboardInner>>,
}

impl DashboardController {
    /// A freshly mounted dashboard, still in `Loading`.
    pub fn mount(backend: Arc<BackendClient>) -> Self {
        Self {
            backend,
            inner: Arc::new(Mutex::new(DashboardInner {
                state: DashboardState::Loading,
                fetching: false,
                live: true,
            })),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.lock().state.clone()
    }

    /// Fetch the aggregate totals. Runs the network call at most once per
    /// mount: later calls return the already settled state, and a call while
    /// the first is still running just reports `Loading`.
    pub async fn load(&self) -> DashboardState {
        {
            let mut inner = self.lock();
            if inner.fetching || inner.state != DashboardState::Loading {
                return inner.state.clone();
            }
            inner.fetching = true;
        }

        debug!("Loading expense dashboard");

        let backend = Arc::clone(&self.backend);
        let inner_clone = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let outcome = backend.fetch_dashboard().await;
            settle(&inner_clone, outcome)
        });

        match task.await {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Dashboard fetch task aborted");
                let mut inner = self.lock();
                inner.fetching = false;
                if inner.live && inner.state == DashboardState::Loading {
                    inner.state = DashboardState::Failed(DASHBOARD_FAILED_MESSAGE.to_string());
                }
                inner.state.clone()
            }
        }
    }

    /// Mark the controller as torn down. A fetch settling afterwards is
    /// discarded instead of mutating dead state.
    pub fn detach(&self) {
        let mut inner = self.lock();
        inner.live = false;
        debug!("Dashboard controller detached");
    }

    fn lock(&self) -> MutexGuard<'_, DashboardInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn settle(
    inner: &Mutex<DashboardInner>,
    outcome: Result<ExpenseBreakdown, BackendError>,
) -> DashboardState {
    let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
    inner.fetching = false;
    if !inner.live {
        debug!("Dropping dashboard settlement for a detached controller");
        return inner.state.clone();
    }
    inner.state = match outcome {
        Ok(breakdown) if breakdown.is_empty() => DashboardState::Empty,
        Ok(breakdown) => {
            debug!(categories = breakdown.len(), "Dashboard loaded");
            DashboardState::Succeeded(breakdown)
        }
        Err(BackendError::Rejected(message)) => {
            warn!(message = %message, "Dashboard fetch rejected by the backend");
            DashboardState::Failed(DASHBOARD_FAILED_MESSAGE.to_string())
        }
        Err(BackendError::Transport(detail)) => {
            warn!(detail = %detail, "Dashboard fetch failed in transport");
            DashboardState::Failed(DASHBOARD_FAILED_MESSAGE.to_string())
        }
    };
    inner.state.clone()
}

use std::sync::Arc;

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use tracing::debug;

use crate::controllers::dashboard::{DashboardController, DashboardState};
use crate::controllers::upload::{UploadSnapshot, UploadState};
use crate::error::{AppResult, RenderHtml};
use crate::state::AppState;
use crate::summary::{self, SummaryLine};
use crate::VERSION;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub version: &'static str,
    pub upload: UploadPanel,
    pub dashboard: DashboardPanel,
}

/// Display model for the upload side of the page.
pub struct UploadPanel {
    pub file_name: String,
    pub has_file: bool,
    pub in_flight: bool,
    pub has_error: bool,
    pub error: String,
    pub has_result: bool,
    pub lines: Vec<SummaryLine>,
    pub total: String,
}

impl UploadPanel {
    pub fn from_snapshot(snapshot: &UploadSnapshot) -> Self {
        let mut panel = Self {
            file_name: snapshot.file_name.clone().unwrap_or_default(),
            has_file: snapshot.file_name.is_some(),
            in_flight: snapshot.in_flight,
            has_error: false,
            error: String::new(),
            has_result: false,
            lines: Vec::new(),
            total: String::new(),
        };
        match &snapshot.state {
            UploadState::Idle | UploadState::Selected | UploadState::InFlight => {}
            UploadState::Succeeded(breakdown) => {
                if let Some(summary) = summary::render(breakdown) {
                    panel.lines = summary.lines;
                    panel.total = summary.total;
                    panel.has_result = true;
                }
            }
            UploadState::Failed(message) => {
                panel.has_error = true;
                panel.error = message.clone();
            }
        }
        panel
    }
}

/// Display model for the dashboard side of the page.
pub struct DashboardPanel {
    pub loading: bool,
    pub has_error: bool,
    pub error: String,
    pub empty: bool,
    pub has_entries: bool,
    pub lines: Vec<SummaryLine>,
    pub total: String,
}

impl DashboardPanel {
    pub fn from_state(state: &DashboardState) -> Self {
        let mut panel = Self {
            loading: false,
            has_error: false,
            error: String::new(),
            empty: false,
            has_entries: false,
            lines: Vec::new(),
            total: String::new(),
        };
        match state {
            DashboardState::Loading => panel.loading = true,
            DashboardState::Empty => panel.empty = true,
            DashboardState::Succeeded(breakdown) => match summary::render(breakdown) {
                Some(summary) => {
                    panel.lines = summary.lines;
                    panel.total = summary.total;
                    panel.has_entries = true;
                }
                None => panel.empty = true,
            },
            DashboardState::Failed(message) => {
                panel.has_error = true;
                panel.error = message.clone();
            }
        }
        panel
    }
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    debug!("Loading home page");

    let dashboard = DashboardController::mount(Arc::clone(&state.backend));
    let dashboard_state = dashboard.load().await;

    let template = HomeTemplate {
        title: "Receipt Classifier".into(),
        version: VERSION,
        upload: UploadPanel::from_snapshot(&state.upload.snapshot()),
        dashboard: DashboardPanel::from_state(&dashboard_state),
    };

    template.render_html()
}

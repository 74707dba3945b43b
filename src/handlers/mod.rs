pub mod home;
pub mod receipts;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(home::index))
        // Receipt upload flow
        .route("/receipts/select", post(receipts::select))
        .route("/receipts/submit", post(receipts::submit))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}

use axum::extract::{Multipart, State};
use axum::response::Redirect;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{StagedReceipt, RECEIPT_FIELD};
use crate::state::AppState;

/// Stage the uploaded file for classification, then return to the page.
///
/// A submission with an empty file slot (the browser posts one when the
/// picker was never used) leaves the current staging untouched.
pub async fn select(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    let mut staged: Option<StagedReceipt> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() == Some(RECEIPT_FIELD) {
            let file_name = field.file_name().map(|s| s.to_string()).unwrap_or_default();
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_default();

            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Upload(e.to_string()))?;

            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            staged = Some(StagedReceipt::new(file_name, content_type, bytes));
        }
    }

    match staged {
        Some(receipt) => {
            state.upload.select_file(receipt);
        }
        None => debug!("Selection posted without a file"),
    }

    Ok(Redirect::to("/"))
}

/// Submit the staged receipt for classification, then return to the page.
/// The controller handles the no-file and already-in-flight cases itself.
pub async fn submit(State(state): State<AppState>) -> AppResult<Redirect> {
    state.upload.submit().await;
    Ok(Redirect::to("/"))
}

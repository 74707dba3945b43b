use std::sync::Arc;

use crate::config::Config;
use crate::controllers::upload::UploadController;
use crate::error::AppResult;
use crate::services::backend::BackendClient;

/// Shared application state.
///
/// The upload controller is app-wide: the browser surface is a single page,
/// so there is one staging slot and one classification flow at a time. Each
/// page view mounts its own dashboard controller instead, because the
/// dashboard re-fetches on every mount.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<BackendClient>,
    pub upload: Arc<UploadController>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let backend = Arc::new(BackendClient::new(&config)?);
        let upload = Arc::new(UploadController::new(Arc::clone(&backend)));
        Ok(Self {
            config: Arc::new(config),
            backend,
            upload,
        })
    }
}

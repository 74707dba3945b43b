pub mod dashboard;
pub mod upload;

pub use dashboard::{DashboardController, DashboardState};
pub use upload::{UploadController, UploadSnapshot, UploadState};

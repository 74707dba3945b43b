use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub backend_url: String,
    pub static_path: PathBuf,
}

/// Default base URL of the classification service.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("SPENDSENSE_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("SPENDSENSE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7070),
            backend_url: env::var("SPENDSENSE_BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.into()),
            static_path: env::var("SPENDSENSE_STATIC_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub mod config;
pub mod controllers;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod summary;

/// Application version from Cargo.toml (single source of truth)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

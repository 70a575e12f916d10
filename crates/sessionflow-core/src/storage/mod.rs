mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/sessionflow[-dev]/` based on SESSIONFLOW_ENV.
///
/// Set SESSIONFLOW_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SESSIONFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sessionflow-dev")
    } else {
        base_dir.join("sessionflow")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

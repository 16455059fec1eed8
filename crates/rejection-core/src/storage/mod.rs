mod config;

pub use config::{CategoriesConfig, Config, DisplayConfig, ValidationConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/rejection-therapy[-dev]/` based on REJECTION_ENV.
///
/// Set REJECTION_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("REJECTION_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("rejection-therapy-dev")
    } else {
        base_dir.join("rejection-therapy")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

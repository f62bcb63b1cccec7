mod config;
pub mod database;

pub use config::{Config, RecommendationsConfig, TimerConfig};
pub use database::{Database, SessionOutcome, SessionRecord, Stats};

use std::path::PathBuf;

/// Returns `~/.config/focal[-dev]/` based on FOCAL_ENV.
///
/// Set FOCAL_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCAL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focal-dev")
    } else {
        base_dir.join("focal")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

mod config;
mod user_session;

pub use config::{AuthConfig, BackendConfig, Config, PlannerConfig};
pub use user_session::UserSession;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the Studyhall data directory, creating it if needed.
///
/// `STUDYHALL_DATA_DIR` wins when set. Otherwise `~/.config/studyhall`, or
/// `~/.config/studyhall-dev` when `STUDYHALL_ENV=dev`.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STUDYHALL_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .ok_or_else(|| ConfigError::DataDir("home directory not found".into()))?
                .join(".config");
            let env = std::env::var("STUDYHALL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyhall-dev")
            } else {
                base_dir.join("studyhall")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

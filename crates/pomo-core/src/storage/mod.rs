pub mod config;
pub mod session_log;

pub use config::{AlertConfig, Config, LogConfig, TimerConfig};
pub use session_log::{Session, SessionLog, DEFAULT_LOG_FILE};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/pomo/`.
///
/// The directory is not created here; writers create it on demand.
///
/// # Errors
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(home.join(".config").join("pomo"))
}

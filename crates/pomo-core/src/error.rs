//! Core error types for pomo-core.
//!
//! Most failure modes in pomo are recovered locally (bad duration input,
//! corrupt log, failed alert). The types here cover what is left: conditions
//! the caller has to see, such as a log file that cannot be written.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session log errors
    #[error("Session log error: {0}")]
    Log(#[from] LogError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors (terminal output, mostly)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session log errors.
///
/// Only the write side can fail; reading swallows corruption.
#[derive(Error, Debug)]
pub enum LogError {
    /// Failed to create the directory holding the log
    #[error("Failed to create log directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the log file
    #[error("Failed to write session log to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the session list
    #[error("Failed to serialize session log: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not determine where the configuration lives
    #[error("Cannot determine configuration directory")]
    NoConfigDir,
}

/// Alert playback errors.
///
/// These never abort a session; the runner reports them as warnings.
#[derive(Error, Debug)]
pub enum AlertError {
    /// Sound file does not exist
    #[error("Sound file not found: {0}")]
    SoundMissing(PathBuf),

    /// Player process could not be started
    #[error("Failed to launch '{player}': {source}")]
    SpawnFailed {
        player: String,
        #[source]
        source: std::io::Error,
    },

    /// Player ran but reported failure
    #[error("'{player}' exited with {status}")]
    PlayerFailed { player: String, status: String },

    /// Terminal bell could not be written
    #[error("Failed to ring terminal bell: {0}")]
    Bell(#[source] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

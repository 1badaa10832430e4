//! # pomo Core Library
//!
//! This library provides the business logic for the pomo focus timer. The
//! `pomo` CLI binary is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Duration parsing**: free-form `"25"`, `"1m30s"`, `"45s"` input with a
//!   graceful fallback
//! - **Session clock**: a wall-clock-deadline countdown that polls below one
//!   second and reports only whole-second changes
//! - **Storage**: JSON session log and TOML configuration
//! - **Alerts**: pluggable end-of-session alerters, chosen per platform
//!
//! ## Key Components
//!
//! - [`SessionClock`]: Deadline-based countdown driver
//! - [`SessionLog`]: Append-only session history
//! - [`SessionRunner`]: Focus sessions and breaks
//! - [`RepeatResolver`]: Re-run the latest matching session
//! - [`Config`]: Application configuration management

pub mod alert;
pub mod duration;
pub mod error;
pub mod repeat;
pub mod runner;
pub mod storage;
pub mod timer;

pub use alert::{alerter_for_platform, Alerter, BellAlerter, CommandAlerter, SilentAlerter};
pub use error::{AlertError, ConfigError, CoreError, LogError};
pub use repeat::{RepeatOutcome, RepeatResolver};
pub use runner::{BreakDefaults, BreakKind, BreakRequest, SessionRunner};
pub use storage::{Config, Session, SessionLog};
pub use timer::{Clock, ManualClock, SessionClock, SystemClock};

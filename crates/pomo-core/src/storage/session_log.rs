//! JSON-file session history.
//!
//! The log is a single JSON array of [`Session`] objects, oldest first:
//!
//! ```json
//! [
//!   {
//!     "timestamp": "2026-10-15 09:30:00",
//!     "duration_seconds": 1500,
//!     "description": "Work",
//!     "tags": "writing,draft"
//!   }
//! ]
//! ```
//!
//! Every append reads the whole file and writes it back. There is no file
//! locking: two processes appending at the same moment can lose a record.
//! A missing, unreadable or corrupt file is read as an empty history, and the
//! next append replaces it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LogError;

/// File name used when no other log location is configured.
pub const DEFAULT_LOG_FILE: &str = "pomodoro_log.json";

pub const DEFAULT_DESCRIPTION: &str = "Work";

/// One completed focus session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Local completion time, second precision.
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub duration_seconds: u64,
    #[serde(default = "default_description")]
    pub description: String,
    /// Comma-separated, free text. May be empty.
    #[serde(default)]
    pub tags: String,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

impl Session {
    /// A session stamped with the current local time.
    pub fn completed_now(duration_seconds: u64, description: &str, tags: &str) -> Self {
        let now = Local::now().naive_local();
        Self {
            timestamp: now.with_nanosecond(0).unwrap_or(now),
            duration_seconds,
            description: description.to_string(),
            tags: tags.to_string(),
        }
    }

    /// Case-insensitive substring match on description or tags.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.description.to_lowercase().contains(&needle)
            || self.tags.to_lowercase().contains(&needle)
    }
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS`.
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Append-only store of completed sessions.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every session, oldest first.
    ///
    /// Never fails: an absent or unparseable file yields an empty list.
    pub fn load(&self) -> Vec<Session> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session log unreadable, treating as empty");
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "session log corrupt, treating as empty");
            Vec::new()
        })
    }

    /// Add a session and rewrite the whole file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn append(&self, session: &Session) -> Result<(), LogError> {
        let mut sessions = self.load();
        sessions.push(session.clone());
        self.write_all(&sessions)?;
        debug!(path = %self.path.display(), count = sessions.len(), "session appended");
        Ok(())
    }

    /// Newest session whose description or tags contain `query`.
    pub fn find_latest_matching(&self, query: &str) -> Option<Session> {
        find_latest_matching(&self.load(), query).cloned()
    }

    /// Up to `limit` sessions, newest first.
    pub fn recent(&self, limit: usize) -> Vec<Session> {
        self.load().into_iter().rev().take(limit).collect()
    }

    fn write_all(&self, sessions: &[Session]) -> Result<(), LogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LogError::CreateDirFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(sessions)?;
        fs::write(&self.path, content).map_err(|source| LogError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

/// Scan newest to oldest for the first session matching `query`.
pub fn find_latest_matching<'a>(sessions: &'a [Session], query: &str) -> Option<&'a Session> {
    sessions.iter().rev().find(|s| s.matches(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn session(h: u32, description: &str, tags: &str) -> Session {
        Session {
            timestamp: at(h, 0),
            duration_seconds: 1500,
            description: description.to_string(),
            tags: tags.to_string(),
        }
    }

    fn temp_log() -> (TempDir, SessionLog) {
        let dir = TempDir::new().unwrap();
        let log = SessionLog::new(dir.path().join(DEFAULT_LOG_FILE));
        (dir, log)
    }

    #[test]
    fn missing_file_is_empty() {
        let (_dir, log) = temp_log();
        assert!(log.load().is_empty());
        assert!(!log.path().exists());
    }

    #[test]
    fn corrupt_file_is_empty() {
        let (_dir, log) = temp_log();
        fs::write(log.path(), "{ not json").unwrap();
        assert!(log.load().is_empty());
    }

    #[test]
    fn blank_file_is_empty() {
        let (_dir, log) = temp_log();
        fs::write(log.path(), "\n").unwrap();
        assert!(log.load().is_empty());
    }

    #[test]
    fn append_then_load_roundtrips() {
        let (_dir, log) = temp_log();
        let first = session(9, "Work A", "x");
        let second = session(10, "Work B", "y,fix");

        log.append(&first).unwrap();
        log.append(&second).unwrap();

        let loaded = log.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], first);
        assert_eq!(loaded.last(), Some(&second));
    }

    #[test]
    fn append_replaces_corrupt_file() {
        let (_dir, log) = temp_log();
        fs::write(log.path(), "garbage").unwrap();
        log.append(&session(9, "Work", "")).unwrap();
        assert_eq!(log.load().len(), 1);
    }

    #[test]
    fn append_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let log = SessionLog::new(dir.path().join("nested/deeper/log.json"));
        log.append(&session(9, "Work", "")).unwrap();
        assert_eq!(log.load().len(), 1);
    }

    #[test]
    fn on_disk_format_uses_expected_keys() {
        let (_dir, log) = temp_log();
        log.append(&session(9, "Work A", "x")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(log.path()).unwrap()).unwrap();
        let entry = &raw.as_array().unwrap()[0];
        assert_eq!(entry["timestamp"], "2026-10-15 09:00:00");
        assert_eq!(entry["duration_seconds"], 1500);
        assert_eq!(entry["description"], "Work A");
        assert_eq!(entry["tags"], "x");
    }

    #[test]
    fn missing_optional_fields_get_defaults() {
        let (_dir, log) = temp_log();
        fs::write(
            log.path(),
            r#"[{"timestamp": "2026-10-15 09:00:00", "duration_seconds": 60}]"#,
        )
        .unwrap();
        let loaded = log.load();
        assert_eq!(loaded[0].description, "Work");
        assert_eq!(loaded[0].tags, "");
    }

    #[test]
    fn find_latest_matching_prefers_newest() {
        let sessions = vec![
            session(9, "Work A", "x"),
            session(10, "Work B", "y,fix"),
        ];
        assert_eq!(
            find_latest_matching(&sessions, "fix").map(|s| s.description.as_str()),
            Some("Work B")
        );
        assert_eq!(
            find_latest_matching(&sessions, "work").map(|s| s.description.as_str()),
            Some("Work B")
        );
        assert_eq!(
            find_latest_matching(&sessions, "a").map(|s| s.description.as_str()),
            Some("Work A")
        );
        assert!(find_latest_matching(&sessions, "zzz").is_none());
    }

    #[test]
    fn matching_is_case_insensitive_on_both_fields() {
        let s = session(9, "Write Report", "Q3,Finance");
        assert!(s.matches("report"));
        assert!(s.matches("FINANCE"));
        assert!(!s.matches("budget"));
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let (_dir, log) = temp_log();
        for h in 8..12 {
            log.append(&session(h, &format!("S{h}"), "")).unwrap();
        }
        let recent: Vec<_> = log.recent(2).into_iter().map(|s| s.description).collect();
        assert_eq!(recent, vec!["S11", "S10"]);
    }

    #[test]
    fn completed_now_drops_subseconds() {
        let s = Session::completed_now(90, "Work", "a,b");
        assert_eq!(s.timestamp.nanosecond(), 0);
        assert_eq!(s.duration_seconds, 90);
    }
}

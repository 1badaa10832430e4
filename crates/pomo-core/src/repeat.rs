//! Re-run a previous session.
//!
//! Looks up the newest logged session whose description or tags contain the
//! query and starts a new focus session with the same duration, description
//! and tags. Nothing to repeat is an ordinary outcome, not an error.

use std::io::Write;

use tracing::debug;

use crate::duration::format_duration;
use crate::error::Result;
use crate::runner::SessionRunner;
use crate::storage::session_log::find_latest_matching;
use crate::storage::Session;
use crate::timer::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatOutcome {
    /// The log is empty or missing.
    NoSessions,
    /// Nothing matched the query.
    NoMatch,
    /// The matched session was run again; holds the newly logged session.
    Repeated(Session),
}

pub struct RepeatResolver<'r, 'a, C: Clock, W: Write> {
    runner: &'r mut SessionRunner<'a, C, W>,
}

impl<'r, 'a, C: Clock, W: Write> RepeatResolver<'r, 'a, C, W> {
    pub fn new(runner: &'r mut SessionRunner<'a, C, W>) -> Self {
        Self { runner }
    }

    /// # Errors
    ///
    /// Only when the repeated session itself fails (see [`SessionRunner::run`]).
    pub fn repeat(&mut self, query: &str) -> Result<RepeatOutcome> {
        let sessions = self.runner.log().load();
        if sessions.is_empty() {
            self.runner.say("No sessions to repeat.")?;
            return Ok(RepeatOutcome::NoSessions);
        }

        let Some(found) = find_latest_matching(&sessions, query).cloned() else {
            self.runner.say(&format!("No session matching '{query}'."))?;
            return Ok(RepeatOutcome::NoMatch);
        };

        debug!(query, timestamp = %found.timestamp, "repeat target found");

        let mut line = format!(
            "Repeating session from {}: {} ({})",
            found.timestamp.format("%Y-%m-%d %H:%M"),
            found.description,
            format_duration(found.duration_seconds)
        );
        if !found.tags.is_empty() {
            line.push_str(&format!(" [{}]", found.tags));
        }
        self.runner.say(&line)?;

        let input = format!("{}s", found.duration_seconds);
        let session = self.runner.run(&input, &found.description, &found.tags)?;
        Ok(RepeatOutcome::Repeated(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::SilentAlerter;
    use crate::storage::SessionLog;
    use crate::timer::{ManualClock, SessionClock};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn seeded_log(dir: &TempDir) -> SessionLog {
        let log = SessionLog::new(dir.path().join("log.json"));
        let day = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        for (h, description, tags, secs) in [(9, "Work A", "x", 60), (10, "Work B", "y,fix", 90)] {
            log.append(&Session {
                timestamp: day.and_hms_opt(h, 0, 0).unwrap(),
                duration_seconds: secs,
                description: description.to_string(),
                tags: tags.to_string(),
            })
            .unwrap();
        }
        log
    }

    #[test]
    fn empty_log_reports_and_does_nothing() {
        let dir = TempDir::new().unwrap();
        let log = SessionLog::new(dir.path().join("log.json"));
        let manual = ManualClock::new();
        let mut runner =
            SessionRunner::new(&log, &SilentAlerter, SessionClock::new(&manual), Vec::new());

        let outcome = RepeatResolver::new(&mut runner).repeat("anything").unwrap();

        assert_eq!(outcome, RepeatOutcome::NoSessions);
        assert!(!log.path().exists());
        assert_eq!(manual.sleep_count(), 0);
        let text = String::from_utf8(runner.into_output()).unwrap();
        assert_eq!(text, "No sessions to repeat.\n");
    }

    #[test]
    fn no_match_reports_query() {
        let dir = TempDir::new().unwrap();
        let log = seeded_log(&dir);
        let manual = ManualClock::new();
        let mut runner =
            SessionRunner::new(&log, &SilentAlerter, SessionClock::new(&manual), Vec::new());

        let outcome = RepeatResolver::new(&mut runner).repeat("zzz").unwrap();

        assert_eq!(outcome, RepeatOutcome::NoMatch);
        assert_eq!(log.load().len(), 2);
        let text = String::from_utf8(runner.into_output()).unwrap();
        assert_eq!(text, "No session matching 'zzz'.\n");
    }

    #[test]
    fn match_reruns_with_stored_parameters() {
        let dir = TempDir::new().unwrap();
        let log = seeded_log(&dir);
        let manual = ManualClock::new();
        let mut runner =
            SessionRunner::new(&log, &SilentAlerter, SessionClock::new(&manual), Vec::new());

        let outcome = RepeatResolver::new(&mut runner).repeat("FIX").unwrap();

        let session = match outcome {
            RepeatOutcome::Repeated(session) => session,
            other => panic!("expected a repeated session, got {other:?}"),
        };
        assert_eq!(session.description, "Work B");
        assert_eq!(session.tags, "y,fix");
        assert_eq!(session.duration_seconds, 90);

        let sessions = log.load();
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions.last(), Some(&session));

        let text = String::from_utf8(runner.into_output()).unwrap();
        assert!(text.starts_with("Repeating session from 2026-10-14 10:00: Work B (1m 30s) [y,fix]\n"));
    }
}

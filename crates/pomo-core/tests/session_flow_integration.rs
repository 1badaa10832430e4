//! Integration tests for the session flow.
//!
//! Runs focus sessions, breaks and repeats end to end against a real log file
//! in a temp directory, with a virtual clock so countdowns finish instantly.

use pomo_core::storage::session_log::DEFAULT_LOG_FILE;
use pomo_core::{
    BreakRequest, Config, ManualClock, RepeatOutcome, RepeatResolver, SessionClock, SessionLog,
    SessionRunner, SilentAlerter,
};
use tempfile::TempDir;

fn log_in(dir: &TempDir) -> SessionLog {
    SessionLog::new(dir.path().join(DEFAULT_LOG_FILE))
}

#[test]
fn test_focus_break_repeat_workflow() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);
    let manual = ManualClock::new();
    let mut runner =
        SessionRunner::new(&log, &SilentAlerter, SessionClock::new(&manual), Vec::new());

    // Two focus sessions and a break
    runner.run("22m30s", "Draft chapter", "writing,book").unwrap();
    runner.run_break(BreakRequest { minutes: None, long: false }).unwrap();
    runner.run("10", "Email", "admin").unwrap();

    let sessions = log.load();
    assert_eq!(sessions.len(), 2, "breaks must not be logged");
    assert_eq!(sessions[0].duration_seconds, 1350);
    assert_eq!(sessions[1].duration_seconds, 600);

    // Repeat by tag, case-insensitive
    let outcome = RepeatResolver::new(&mut runner).repeat("BOOK").unwrap();
    match outcome {
        RepeatOutcome::Repeated(session) => {
            assert_eq!(session.description, "Draft chapter");
            assert_eq!(session.duration_seconds, 1350);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let sessions = log.load();
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[2].tags, "writing,book");
}

#[test]
fn test_repeat_on_missing_log_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);
    let manual = ManualClock::new();
    let mut runner =
        SessionRunner::new(&log, &SilentAlerter, SessionClock::new(&manual), Vec::new());

    let outcome = RepeatResolver::new(&mut runner).repeat("fix").unwrap();

    assert_eq!(outcome, RepeatOutcome::NoSessions);
    assert!(!log.path().exists());
}

#[test]
fn test_load_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);
    let manual = ManualClock::new();
    let mut runner =
        SessionRunner::new(&log, &SilentAlerter, SessionClock::new(&manual), Vec::new());
    runner.run("1s", "Work", "").unwrap();
    runner.run("2s", "Work", "x").unwrap();

    assert_eq!(log.load(), log.load());
}

#[test]
fn test_corrupt_log_recovers_on_next_session() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);
    std::fs::write(log.path(), "[{\"timestamp\": 12").unwrap();

    assert!(log.load().is_empty());
    assert!(log.find_latest_matching("work").is_none());

    let manual = ManualClock::new();
    let mut runner =
        SessionRunner::new(&log, &SilentAlerter, SessionClock::new(&manual), Vec::new());
    let session = runner.run("5s", "Work", "").unwrap();

    assert_eq!(log.load(), vec![session]);
}

#[test]
fn test_config_drives_break_lengths() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);
    let mut config = Config::default();
    config.set("timer.long_break", "20").unwrap();

    let manual = ManualClock::new();
    let mut runner =
        SessionRunner::new(&log, &SilentAlerter, SessionClock::new(&manual), Vec::new())
            .with_break_defaults((&config.timer).into());

    let (_, seconds) = runner
        .run_break(BreakRequest { minutes: None, long: true })
        .unwrap();
    assert_eq!(seconds, 1200);
}

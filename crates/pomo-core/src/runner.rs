//! Session orchestration.
//!
//! A focus session is: parse the duration, count down, alert, log. A break
//! is the same countdown without the log entry.
//!
//! Output goes to any `io::Write` so the whole flow can run against a
//! `Vec<u8>` and a [`ManualClock`](crate::timer::ManualClock) in tests.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::alert::Alerter;
use crate::duration::{self, format_clock, format_duration};
use crate::error::Result;
use crate::storage::session_log::DEFAULT_DESCRIPTION;
use crate::storage::{Session, SessionLog, TimerConfig};
use crate::timer::{Clock, SessionClock};

/// Break lengths in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakDefaults {
    pub short_minutes: u32,
    pub long_minutes: u32,
}

impl Default for BreakDefaults {
    fn default() -> Self {
        Self {
            short_minutes: 5,
            long_minutes: 15,
        }
    }
}

impl From<&TimerConfig> for BreakDefaults {
    fn from(config: &TimerConfig) -> Self {
        Self {
            short_minutes: config.short_break,
            long_minutes: config.long_break,
        }
    }
}

/// What the user asked for on `break`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BreakRequest {
    /// Explicit length; wins over `long` when positive.
    pub minutes: Option<f64>,
    pub long: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    Custom,
    Long,
    Short,
}

impl BreakKind {
    pub fn label(self) -> &'static str {
        match self {
            BreakKind::Custom => "break",
            BreakKind::Long => "long break",
            BreakKind::Short => "short break",
        }
    }
}

/// Resolve a break request: explicit minutes, then `long`, then short.
///
/// Zero, negative and non-finite minutes count as not given.
pub fn resolve_break(request: BreakRequest, defaults: BreakDefaults) -> (BreakKind, u64) {
    match request.minutes {
        Some(m) if m.is_finite() && m > 0.0 => (BreakKind::Custom, (m * 60.0).round() as u64),
        _ if request.long => (BreakKind::Long, u64::from(defaults.long_minutes) * 60),
        _ => (BreakKind::Short, u64::from(defaults.short_minutes) * 60),
    }
}

/// Drives focus sessions and breaks.
pub struct SessionRunner<'a, C: Clock, W: Write> {
    log: &'a SessionLog,
    alerter: &'a dyn Alerter,
    clock: SessionClock<C>,
    out: W,
    breaks: BreakDefaults,
}

impl<'a, C: Clock, W: Write> SessionRunner<'a, C, W> {
    pub fn new(log: &'a SessionLog, alerter: &'a dyn Alerter, clock: SessionClock<C>, out: W) -> Self {
        Self {
            log,
            alerter,
            clock,
            out,
            breaks: BreakDefaults::default(),
        }
    }

    pub fn with_break_defaults(mut self, breaks: BreakDefaults) -> Self {
        self.breaks = breaks;
        self
    }

    pub fn log(&self) -> &'a SessionLog {
        self.log
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run a focus session and log it on completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written or the session
    /// cannot be appended to the log. Alert failures are only warned about.
    pub fn run(&mut self, duration_input: &str, description: &str, tags: &str) -> Result<Session> {
        let seconds = duration::parse(duration_input).seconds;
        let description = match description.trim() {
            "" => DEFAULT_DESCRIPTION,
            d => d,
        };
        let pretty = format_duration(seconds);

        if tags.is_empty() {
            writeln!(self.out, "Starting a {pretty} session: {description}. Time to focus! 🧘")?;
        } else {
            writeln!(
                self.out,
                "Starting a {pretty} session: {description} [{tags}]. Time to focus! 🧘"
            )?;
        }
        info!(seconds, description, tags, "focus session started");

        self.countdown(seconds)?;

        writeln!(self.out, "🎉 {pretty} session finished! Time for a short break. 🎉")?;
        self.alert();

        let session = Session::completed_now(seconds, description, tags);
        self.log.append(&session)?;
        info!(path = %self.log.path().display(), "session logged");

        Ok(session)
    }

    /// Run a break. Breaks are never logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written.
    pub fn run_break(&mut self, request: BreakRequest) -> Result<(BreakKind, u64)> {
        let (kind, seconds) = resolve_break(request, self.breaks);

        writeln!(
            self.out,
            "Starting a {} {}. Time to relax! ☕",
            format_duration(seconds),
            kind.label()
        )?;
        info!(seconds, kind = kind.label(), "break started");

        self.countdown(seconds)?;

        writeln!(self.out, "🎉 Break is over! Time to get back to it. 🎉")?;
        self.alert();

        Ok((kind, seconds))
    }

    pub(crate) fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Render the countdown in place until it reaches zero.
    fn countdown(&mut self, seconds: u64) -> io::Result<()> {
        let out = &mut self.out;
        let mut write_error: Option<io::Error> = None;
        let mut finished = false;

        self.clock.run(
            seconds,
            |remaining| {
                if write_error.is_some() {
                    return;
                }
                let rendered = write!(out, "\r  ⏳ Time remaining: {}", format_clock(remaining))
                    .and_then(|()| out.flush());
                if let Err(e) = rendered {
                    write_error = Some(e);
                }
            },
            || finished = true,
        );

        if let Some(e) = write_error {
            return Err(e);
        }
        debug_assert!(finished);
        writeln!(self.out)
    }

    fn alert(&self) {
        if let Err(e) = self.alerter.play_alert() {
            warn!(alerter = self.alerter.name(), error = %e, "alert failed");
        }
    }
}

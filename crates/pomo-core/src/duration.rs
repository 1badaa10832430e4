//! Duration parsing and formatting.
//!
//! Accepts what people actually type on a command line:
//!
//! - `"25"` -> 25 minutes
//! - `"45s"`, `"2m"`, `"22m30s"`, `"30s1m"` -> sum of `<digits><m|s>` tokens
//!
//! Anything else falls back to [`DEFAULT_DURATION_SECS`] with a warning.
//! Parsing never fails; bad input degrades to the default instead of
//! rejecting the session.

use tracing::warn;

/// Fallback when no duration can be read from the input (25 minutes).
pub const DEFAULT_DURATION_SECS: u64 = 25 * 60;

/// Result of parsing a duration string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDuration {
    pub seconds: u64,
    /// True when the input held no usable duration and the default was used.
    pub defaulted: bool,
}

/// Parse free-form duration text into seconds.
///
/// Emits a `warn!` event when the default is applied.
pub fn parse(input: &str) -> ParsedDuration {
    let trimmed = input.trim();

    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return ParsedDuration {
            seconds: parse_digits(trimmed).saturating_mul(60),
            defaulted: false,
        };
    }

    match scan_tokens(trimmed) {
        Some(seconds) => ParsedDuration {
            seconds,
            defaulted: false,
        },
        None => {
            warn!(
                input = %input,
                "could not parse duration, defaulting to {}",
                format_duration(DEFAULT_DURATION_SECS)
            );
            ParsedDuration {
                seconds: DEFAULT_DURATION_SECS,
                defaulted: true,
            }
        }
    }
}

/// Shorthand for `parse(input).seconds`.
pub fn parse_seconds(input: &str) -> u64 {
    parse(input).seconds
}

/// Sum every `<digits>m` / `<digits>s` token. `None` if there were none.
fn scan_tokens(input: &str) -> Option<u64> {
    let mut total: u64 = 0;
    let mut found = false;
    let mut digits_start: Option<usize> = None;

    for (i, ch) in input.char_indices() {
        if ch.is_ascii_digit() {
            digits_start.get_or_insert(i);
            continue;
        }

        if let Some(start) = digits_start.take() {
            let value = parse_digits(&input[start..i]);
            match ch {
                'm' => {
                    total = total.saturating_add(value.saturating_mul(60));
                    found = true;
                }
                's' => {
                    total = total.saturating_add(value);
                    found = true;
                }
                _ => {}
            }
        }
    }

    found.then_some(total)
}

/// Decimal digits to u64, saturating on overflow.
fn parse_digits(digits: &str) -> u64 {
    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

/// Human-readable duration: `"25m"`, `"1m 30s"`, `"45s"`, `"0s"`.
pub fn format_duration(seconds: u64) -> String {
    let (mins, secs) = (seconds / 60, seconds % 60);
    match (mins, secs) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m {s}s"),
    }
}

/// Countdown display, `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

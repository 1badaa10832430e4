//! Session history listing.

use pomo_core::duration::format_duration;
use pomo_core::Session;

use crate::context::{Context, GlobalArgs};

pub fn run(globals: &GlobalArgs, limit: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load(globals);
    let recent = ctx.log.recent(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&recent)?);
        return Ok(());
    }

    // `-n 0` still prints the totals
    if recent.is_empty() && limit > 0 {
        println!("No sessions logged yet.");
        return Ok(());
    }

    for session in &recent {
        let tags = if session.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", session.tags)
        };
        println!(
            "{}  {:>8}  {}{}",
            session.timestamp.format("%Y-%m-%d %H:%M"),
            format_duration(session.duration_seconds),
            session.description,
            tags
        );
    }

    let all = ctx.log.load();
    println!();
    println!("{} sessions, {} focused in total", all.len(), format_total(total_seconds(&all)));
    Ok(())
}

fn total_seconds(sessions: &[Session]) -> u64 {
    sessions
        .iter()
        .map(|s| s.duration_seconds)
        .fold(0, u64::saturating_add)
}

fn format_total(seconds: u64) -> String {
    let (hours, mins) = (seconds / 3600, (seconds % 3600) / 60);
    if hours > 0 {
        format!("{hours}h {mins:02}m")
    } else {
        format_duration(seconds)
    }
}

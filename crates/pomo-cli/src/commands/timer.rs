//! Focus, break and repeat commands.

use pomo_core::{BreakRequest, RepeatResolver};

use crate::context::{Context, GlobalArgs};

pub fn start(
    globals: &GlobalArgs,
    description: &str,
    duration: Option<&str>,
    tags: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load(globals);
    let duration = duration.unwrap_or(&ctx.config.timer.focus_duration);
    ctx.runner().run(duration, description, tags)?;
    Ok(())
}

pub fn take_break(
    globals: &GlobalArgs,
    minutes: Option<f64>,
    long: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load(globals);
    ctx.runner().run_break(BreakRequest { minutes, long })?;
    Ok(())
}

pub fn repeat(globals: &GlobalArgs, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load(globals);
    let mut runner = ctx.runner();
    RepeatResolver::new(&mut runner).repeat(query)?;
    Ok(())
}

//! Wiring from global flags to core services.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use pomo_core::storage::AlertConfig;
use pomo_core::{
    alerter_for_platform, Alerter, Config, ConfigError, SessionClock, SessionLog, SessionRunner,
    SystemClock,
};
use tracing::{debug, warn};

/// Flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub log_file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_sound: bool,
}

impl GlobalArgs {
    /// `--config`, or the default location.
    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::default_path(),
        }
    }
}

/// Everything a timer command needs.
pub struct Context {
    pub config: Config,
    pub log: SessionLog,
    alerter: Box<dyn Alerter>,
}

impl Context {
    /// Build from flags. A broken config file is reported and replaced by
    /// defaults so a typo never blocks a session.
    pub fn load(args: &GlobalArgs) -> Self {
        let config = match args.config_path().and_then(|p| Config::load_from(&p)) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "using default configuration");
                Config::default()
            }
        };

        let log_path = args
            .log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.log.path));
        let log = SessionLog::new(log_path);

        let alerter = if args.no_sound {
            alerter_for_platform(&AlertConfig {
                enabled: false,
                ..config.alert.clone()
            })
        } else {
            alerter_for_platform(&config.alert)
        };

        debug!(log = %log.path().display(), alerter = alerter.name(), "context ready");

        Self {
            config,
            log,
            alerter,
        }
    }

    pub fn runner(&self) -> SessionRunner<'_, SystemClock, Stdout> {
        let clock = SessionClock::new(SystemClock)
            .with_poll_interval(Duration::from_millis(self.config.timer.poll_interval_ms));
        SessionRunner::new(&self.log, self.alerter.as_ref(), clock, io::stdout())
            .with_break_defaults((&self.config.timer).into())
    }
}

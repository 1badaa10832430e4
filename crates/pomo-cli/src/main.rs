use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

use context::GlobalArgs;

#[derive(Parser)]
#[command(name = "pomo", version, about = "A simple Pomodoro timer CLI")]
struct Cli {
    /// Session log file (overrides the configured path)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Configuration file (default: ~/.config/pomo/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Do not play the end-of-session alert
    #[arg(long, global = true)]
    no_sound: bool,
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a focus session
    Start {
        /// What you are working on
        #[arg(default_value = "Work")]
        description: String,
        /// Duration: minutes ("25") or units ("1m30s", "45s")
        #[arg(short, long)]
        duration: Option<String>,
        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// Start a break (not logged)
    Break {
        /// Break length in minutes (fractions allowed)
        #[arg(short, long)]
        minutes: Option<f64>,
        /// Long break instead of a short one
        #[arg(short, long)]
        long: bool,
    },
    /// Re-run the most recent session matching a query
    Repeat {
        /// Text to look for in description or tags
        query: String,
    },
    /// Show logged sessions, newest first
    History {
        /// How many sessions to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let directives = if verbose {
        "pomo=debug,pomo_core=debug"
    } else {
        "pomo=warn,pomo_core=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let globals = GlobalArgs {
        log_file: cli.log_file,
        config: cli.config,
        no_sound: cli.no_sound,
    };

    let result = match cli.command {
        Commands::Start {
            description,
            duration,
            tags,
        } => commands::timer::start(&globals, &description, duration.as_deref(), &tags),
        Commands::Break { minutes, long } => commands::timer::take_break(&globals, minutes, long),
        Commands::Repeat { query } => commands::timer::repeat(&globals, &query),
        Commands::History { limit, json } => commands::history::run(&globals, limit, json),
        Commands::Config { action } => commands::config::run(&globals, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagewire_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "pagewire")]
#[command(version, about = "Deterministic interaction engine for static marketing pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to an alternate configuration file
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scenario against a page and print the effect trace
    Run {
        /// Page description file
        #[arg(short, long)]
        page: PathBuf,
        /// Scenario file
        #[arg(short, long)]
        scenario: PathBuf,
        /// Emit the trace as JSON
        #[arg(long)]
        json: bool,
        /// Print a final-state summary after the trace
        #[arg(long)]
        summary: bool,
        /// Extra simulated time for animations and timers to settle, in ms
        #[arg(long, default_value_t = 10_000)]
        settle_ms: u64,
    },
    /// Print the parsed element tree of a page file
    Inspect {
        /// Page description file
        #[arg(short, long)]
        page: PathBuf,
    },
    /// Validate page and scenario files without running
    Check {
        /// Page description file
        #[arg(short, long)]
        page: PathBuf,
        /// Scenario file
        #[arg(short, long)]
        scenario: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Run {
            page,
            scenario,
            json,
            summary,
            settle_ms,
        } => commands::run::run(&config, &page, &scenario, json, summary, settle_ms),
        Commands::Inspect { page } => commands::inspect::run(&page),
        Commands::Check { page, scenario } => commands::check::run(&page, scenario.as_deref()),
    }
}

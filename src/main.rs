//! Quantum Registry CLI
//!
//! Replays scenario files against a fresh in-memory registry and prints the
//! outcome of every step as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quantum_registry::{RegistryConfig, Scenario, ScenarioReport};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Quantum Registry - ownership-gated registration of quantum computers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Initial admin identity
    #[arg(long, env = "REGISTRY_DEFAULT_ADMIN", default_value = quantum_registry::config::DEFAULT_ADMIN)]
    default_admin: String,

    /// Event channel capacity
    #[arg(long, env = "REGISTRY_EVENT_CAPACITY", default_value_t = quantum_registry::config::DEFAULT_EVENT_CAPACITY)]
    event_capacity: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario file (YAML, or JSON with a .json extension)
    Run {
        /// Scenario file
        file: PathBuf,

        /// Print one JSON line per step instead of a pretty report
        #[arg(long)]
        compact: bool,
    },
}

// =============================================================================
// Main
// =============================================================================

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let config = RegistryConfig {
        default_admin: args.default_admin.clone(),
        event_capacity: args.event_capacity,
    };
    config.validate()?;

    info!("Starting Quantum Registry");
    info!("  Version: {}", quantum_registry::VERSION);
    info!("  Default admin: {}", config.default_admin);

    match args.command {
        Command::Run { file, compact } => {
            let scenario = Scenario::from_path(&file)
                .with_context(|| format!("failed to load scenario {}", file.display()))?;
            let report = scenario.run(&config)?;
            print_report(&report, compact)?;

            if !report.passed {
                error!("Scenario {} did not match its expectations", file.display());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_report(report: &ScenarioReport, compact: bool) -> anyhow::Result<()> {
    if compact {
        for outcome in &report.outcomes {
            println!("{}", serde_json::to_string(outcome)?);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(report)?);
    }
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so stdout carries only the report
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

//! Rankings Service
//!
//! `rankings serve` runs the HTTP API; `rankings report` prints one ranking
//! report as JSON and exits.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rank_aggregator::parse_week_param;
use std::path::PathBuf;
use tracing::info;

use rankings_service::{initialize_logging, load_configuration, run_server, AppState};

/// Merged weekly fantasy football rankings
#[derive(Parser)]
#[command(name = "rankings")]
#[command(version, about = "Merged weekly fantasy football rankings")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Command to execute (defaults to serve)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Port to listen on, overriding configuration
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the ranking report as JSON
    Report {
        /// Week 1-17; anything else means the current week
        #[arg(short, long)]
        week: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_configuration(cli.config.as_deref())?;
    initialize_logging(&config)?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }

            info!("Starting Rankings Service v{}", env!("CARGO_PKG_VERSION"));
            let state = AppState::new(&config).await.context("Failed to initialize service")?;
            run_server(&config, state).await?;
            info!("Rankings Service shutdown complete");
        }
        Commands::Report { week } => {
            let state = AppState::new(&config).await.context("Failed to initialize service")?;
            let week = parse_week_param(week.as_deref());
            let report = state.aggregator().compute_rankings(week).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

//! Reelflow CLI - Command-line interface
//!
//! Drives a scripted playback coordination session over simulated
//! components, useful for demoing and debugging the coordinator.

mod commands;

use clap::Parser;
use reelflow_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "reelflow")]
#[command(about = "Feed-driven playback view-state coordinator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level
    #[arg(long, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_tracing_level(), None)?;

    commands::handle_command(cli.command).await?;

    Ok(())
}

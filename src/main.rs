//! Strictly Ultimate - Unified CLI
//!
//! Ultimate tic-tac-toe with several modes of operation.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_ultimate::{ClockConfig, DEFAULT_SCRIPT, GameConfig, rules_text, run_demo};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config } => run_play(config).await,
        Command::Rules => {
            println!("{}", rules_text(ClockConfig::default().turn_seconds()));
            Ok(())
        }
        Command::Demo { log_filter } => run_demo_mode(log_filter),
    }
}

/// Run the terminal game
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(config_path: std::path::PathBuf) -> Result<()> {
    let config = GameConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    initialize_file_tracing(&config)?;
    info!("Starting Strictly Ultimate TUI");

    tui::run_tui(config).await
}

/// Run a scripted game with logs on stderr
fn run_demo_mode(log_filter: String) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Running scripted demo");
    let snapshot = run_demo(DEFAULT_SCRIPT);
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize final snapshot")?
    );
    Ok(())
}

/// Logs go to a file so they don't interfere with the TUI.
fn initialize_file_tracing(config: &GameConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    Ok(())
}

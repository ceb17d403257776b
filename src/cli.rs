//! Command-line interface for strictly_ultimate.

use clap::{Parser, Subcommand};

/// Strictly Ultimate - ultimate tic-tac-toe with a per-turn countdown
#[derive(Parser, Debug)]
#[command(name = "strictly_ultimate")]
#[command(about = "Ultimate tic-tac-toe for two players at one terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the game config file (defaults are used if it doesn't exist)
        #[arg(short, long, default_value = "strictly_ultimate.toml")]
        config: std::path::PathBuf,
    },

    /// Print the rules
    Rules,

    /// Play a scripted game headless, logging every state change as JSON
    Demo {
        /// Log filter when RUST_LOG is not set
        #[arg(long, default_value = "info")]
        log_filter: String,
    },
}

//! Command-line interface for the tic-tac-toe front-end.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe - hot-seat N×N games in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play N×N tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game on stdin/stdout
    Play {
        /// Path to a TOML game config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Board size (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Seed for the first-player draw (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Marker for player 0 (overrides config)
        #[arg(long = "x", requires = "marker_one")]
        marker_zero: Option<String>,

        /// Marker for player 1 (overrides config)
        #[arg(long = "o", requires = "marker_zero")]
        marker_one: Option<String>,

        /// Print the final game state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a config file and print the resolved settings
    CheckConfig {
        /// Path to a TOML game config
        path: PathBuf,
    },
}

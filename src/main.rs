//! Tic-tac-toe - terminal front-end
//!
//! Hot-seat play over stdin/stdout on top of the engine library.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictactoe_engine::{GameConfig, Outcome, run_session};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            size,
            seed,
            marker_zero,
            marker_one,
            json,
        } => run_play(config, size, seed, marker_zero.zip(marker_one), json),
        Command::CheckConfig { path } => run_check_config(path),
    }
}

/// Play one game
#[instrument(skip_all)]
fn run_play(
    config_path: Option<PathBuf>,
    size: Option<usize>,
    seed: Option<u64>,
    markers: Option<(String, String)>,
    json: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = size {
        config = config.with_size(size);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some((zero, one)) = markers {
        config = config.with_markers(zero, one);
    }
    config.validate()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = run_session(&config, stdin.lock(), stdout.lock(), json)?;

    match outcome {
        Some(Outcome::Winner(player)) => info!(%player, "Session finished with a winner"),
        Some(Outcome::Draw) => info!("Session finished in a draw"),
        None => info!("Session abandoned"),
    }
    Ok(())
}

/// Validate a config file
#[instrument(skip_all)]
fn run_check_config(path: PathBuf) -> Result<()> {
    let config = GameConfig::from_file(&path)?;
    config.validate()?;
    println!("{}", toml::to_string(&config)?);
    Ok(())
}

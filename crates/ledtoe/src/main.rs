//! ledtoe - tic-tac-toe on a simulated LED matrix

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use ledtoe::{Cli, LedtoeConfig, runner};
use std::fs::File;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log to a file so the matrix display stays clean
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ledtoe=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(command = ?cli.command, config = %cli.config.display(), "Starting ledtoe");

    let config = LedtoeConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    runner::run(cli.command, &config, cli.seed)
}

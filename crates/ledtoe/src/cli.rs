//! Command-line interface for ledtoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LED-matrix tic-tac-toe against a heuristic AI
#[derive(Parser, Debug)]
#[command(name = "ledtoe")]
#[command(about = "Tic-tac-toe on a simulated 5x5 LED matrix", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it does not exist)
    #[arg(long, default_value = "ledtoe.toml")]
    pub config: PathBuf,

    /// File that receives log output
    #[arg(long, default_value = "ledtoe.log")]
    pub log_file: PathBuf,

    /// Seed for the AI's random moves; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Input modality, chosen once at startup
    #[command(subcommand)]
    pub command: Command,
}

/// Input modalities
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Arrow keys steer the cursor, Enter confirms
    Joystick,

    /// Space claps: one clap advances, two or more confirm
    Mic,
}

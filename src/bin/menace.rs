//! MENACE CLI - train, play against and inspect a matchbox learner
//!
//! This CLI provides:
//! - Training against random, defensive or deterministic opponents
//! - An interactive game against the trained agent
//! - Inspection of individual matchboxes

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "menace")]
#[command(version, about = "Matchbox Educable Noughts And Crosses Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train MENACE and report win/draw/loss rates
    Train(menace::cli::commands::train::TrainArgs),

    /// Train MENACE, then play a game against it
    Play(menace::cli::commands::play::PlayArgs),

    /// Train MENACE, then show its matchbox for a board
    Inspect(menace::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => menace::cli::commands::train::execute(args),
        Commands::Play(args) => menace::cli::commands::play::execute(args),
        Commands::Inspect(args) => menace::cli::commands::inspect::execute(args),
    }
}

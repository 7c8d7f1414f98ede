//! Inspect command - Show the matchbox MENACE holds for a position

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{AgentArgs, DEFAULT_TRAINING_GAMES},
        output::{format_number, print_kv, print_section, render_beads},
    },
    pipeline::{TrainingConfig, TrainingPipeline},
    tictactoe::BoardState,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a matchbox", allow_negative_numbers = true)]
pub struct InspectArgs {
    /// Board as 9 cells, e.g. "X...O...." (`.` or space for empty)
    #[arg(long, default_value = ".........")]
    pub board: String,

    /// Games MENACE trains before the box is read
    #[arg(long, default_value_t = DEFAULT_TRAINING_GAMES)]
    pub training_games: usize,

    #[command(flatten)]
    pub agent: AgentArgs,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let state = BoardState::from_string(&args.board)
        .with_context(|| format!("invalid board '{}'", args.board))?;

    let seed = args.agent.resolve_seed();
    let (mut agent, mut opponent) = args.agent.build(seed)?;

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: args.training_games,
        report_every: args.training_games.max(1),
    });
    pipeline
        .run(&mut agent, opponent.as_mut())
        .context("training failed")?;

    let (key, beads) = agent
        .inspect_box(&state)
        .with_context(|| format!("no matchbox for board '{}'", args.board))?;

    print_section("Matchbox");
    print_kv("Training games", &format_number(agent.games_trained()));
    print_kv("Canonical key", &key.to_string());
    print_kv("Board", &state.encode());
    print_kv("Total beads", &beads.values().sum::<i32>().to_string());
    println!();
    println!("{state}");
    println!();
    println!("{}", render_beads(&state, &beads));

    Ok(())
}

//! Play command - Train MENACE, then play a game against it

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::Rng;

use crate::{
    cli::{
        config::{AgentArgs, DEFAULT_TRAINING_GAMES},
        output::{format_number, render_numbered},
    },
    menace::MenaceAgent,
    pipeline::{AGENT_PLAYER, TrainingConfig, TrainingPipeline},
    tictactoe::{Game, GameOutcome},
};

#[derive(Parser, Debug)]
#[command(about = "Play against a trained MENACE", allow_negative_numbers = true)]
pub struct PlayArgs {
    /// Games MENACE trains before playing you
    #[arg(long, default_value_t = DEFAULT_TRAINING_GAMES)]
    pub training_games: usize,

    #[command(flatten)]
    pub agent: AgentArgs,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let seed = args.agent.resolve_seed();
    let (mut agent, mut opponent) = args.agent.build(seed)?;

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: args.training_games,
        report_every: args.training_games.max(1),
    });
    let result = pipeline
        .run(&mut agent, opponent.as_mut())
        .context("training failed")?;

    println!(
        "MENACE trained for {} games against {} (win rate {:.1}%)",
        format_number(result.totals.games),
        opponent.name(),
        result.totals.win_rate * 100.0
    );
    println!("MENACE plays X and moves first. You are O.\n");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play_interactive(&mut agent, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Play one game between the agent (X) and a human (O) reading moves from
/// `input`. Unparseable or illegal moves are re-prompted.
///
/// The agent learns from the finished game like any other.
///
/// # Errors
///
/// Fails if `input` ends before the game does.
pub fn play_interactive<R: Rng>(
    agent: &mut MenaceAgent<R>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<GameOutcome> {
    let mut game = Game::new();
    let mut history = Vec::new();

    let outcome = loop {
        if let Some(outcome) = game.outcome {
            break outcome;
        }

        let state = *game.current_state();
        if state.to_move == AGENT_PLAYER {
            let (position, entry) = agent.choose_move(&state)?;
            history.push(entry);
            game.play(position)?;
            writeln!(output, "MENACE plays {position}")?;
            continue;
        }

        writeln!(output, "\n{}\n", render_numbered(&state))?;
        write!(output, "Your move (0-8): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the game finished");
        }

        let position = match line.trim().parse::<usize>() {
            Ok(position) if position < 9 && state.is_empty(position) => position,
            _ => {
                writeln!(output, "Invalid move '{}', try again", line.trim())?;
                continue;
            }
        };
        game.play(position)?;
    };

    agent.update(&history, outcome.relative_to(AGENT_PLAYER));

    writeln!(output, "\n{}\n", render_numbered(game.current_state()))?;
    let message = match outcome {
        GameOutcome::Win(player) if player == AGENT_PLAYER => "MENACE wins!",
        GameOutcome::Win(_) => "You win!",
        GameOutcome::Draw => "It's a draw.",
    };
    writeln!(output, "{message}")?;
    Ok(outcome)
}

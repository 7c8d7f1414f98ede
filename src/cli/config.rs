//! Shared configuration types for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::{
    menace::{MenaceAgent, MenaceConfig},
    pipeline::{DefensiveOpponent, FirstAvailableOpponent, RandomOpponent},
    ports::Opponent,
};

/// Default number of training games
pub const DEFAULT_TRAINING_GAMES: usize = 3000;

/// Default games between snapshot lines
pub const DEFAULT_REPORT_EVERY: usize = 500;

/// Opponent policy selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    /// Uniformly random moves
    Random,
    /// Wins when it can, blocks when it must, random otherwise
    Defensive,
    /// Lowest-index empty cell
    First,
}

impl OpponentKind {
    /// Build the opponent, seeding it when it is stochastic
    pub fn build(self, seed: u64) -> Box<dyn Opponent> {
        match self {
            OpponentKind::Random => Box::new(RandomOpponent::seeded(seed)),
            OpponentKind::Defensive => Box::new(DefensiveOpponent::seeded(seed)),
            OpponentKind::First => Box::new(FirstAvailableOpponent::new()),
        }
    }
}

/// Agent and opponent options shared by every command that trains
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Opponent to train against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// JSON file with agent configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Beads per move in a new matchbox
    #[arg(long)]
    pub initial_beads: Option<i32>,

    /// Beads added to each move after a win
    #[arg(long)]
    pub win: Option<i32>,

    /// Beads added to each move after a draw
    #[arg(long)]
    pub draw: Option<i32>,

    /// Beads added to each move after a loss (usually negative)
    #[arg(long)]
    pub loss: Option<i32>,
}

impl AgentArgs {
    /// Agent configuration: file (if given), then flag overrides.
    pub fn menace_config(&self) -> Result<MenaceConfig> {
        let mut config = match &self.config {
            Some(path) => MenaceConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => MenaceConfig::default(),
        };

        if let Some(beads) = self.initial_beads {
            config.initial_beads = beads;
        }
        if let Some(win) = self.win {
            config.reinforcement.win = win;
        }
        if let Some(draw) = self.draw {
            config.reinforcement.draw = draw;
        }
        if let Some(loss) = self.loss {
            config.reinforcement.loss = loss;
        }

        config.validate()?;
        Ok(config)
    }

    /// The explicit seed, or a fresh random one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Build the agent and its opponent from one seed.
    pub fn build(&self, seed: u64) -> Result<(MenaceAgent, Box<dyn Opponent>)> {
        let agent = MenaceAgent::seeded(self.menace_config()?, seed)?;
        let opponent = self.opponent.build(seed.wrapping_add(1));
        Ok((agent, opponent))
    }
}

//! Training pipeline for the MENACE agent

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    menace::{HistoryEntry, MenaceAgent, Outcome},
    ports::{Observer, Opponent},
    tictactoe::{Game, GameOutcome, Player},
};

/// MENACE always plays X and always opens.
pub const AGENT_PLAYER: Player = Player::X;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training games
    pub num_games: usize,

    /// Games between progress snapshots
    pub report_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 5000,
            report_every: 500,
        }
    }
}

/// Cumulative results after a number of games
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl Snapshot {
    /// Build a snapshot, computing rates against `games`.
    pub fn new(games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if games > 0 {
                count as f64 / games as f64
            } else {
                0.0
            }
        };

        Self {
            games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Totals after the last game
    pub totals: Snapshot,

    /// Snapshots taken at each reporting interval and after the final game
    pub snapshots: Vec<Snapshot>,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Everything the agent needs to learn from one finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Outcome from the agent's point of view
    pub outcome: Outcome,
    /// Board-level outcome
    pub game_outcome: GameOutcome,
    /// Agent moves in canonical coordinates
    pub history: Vec<HistoryEntry>,
    /// All moves of both sides in play order
    pub moves: Vec<usize>,
}

/// Play one game from the empty board, the agent moving first.
///
/// The agent is not updated here; see [`TrainingPipeline::run`].
///
/// # Errors
///
/// Fails if the opponent answers `None` or an illegal move on a live board.
pub fn play_game<R: Rng>(
    agent: &mut MenaceAgent<R>,
    opponent: &mut dyn Opponent,
) -> Result<GameRecord> {
    let mut game = Game::new();
    let mut history = Vec::new();

    let game_outcome = loop {
        if let Some(outcome) = game.outcome {
            break outcome;
        }

        let state = *game.current_state();
        let position = if state.to_move == AGENT_PLAYER {
            let (position, entry) = agent.choose_move(&state)?;
            history.push(entry);
            position
        } else {
            opponent
                .select_move(&state)
                .ok_or_else(|| Error::OpponentMoveMissing {
                    opponent: opponent.name().to_string(),
                })?
        };

        game.play(position)?;
    };

    Ok(GameRecord {
        outcome: game_outcome.relative_to(AGENT_PLAYER),
        game_outcome,
        history,
        moves: game.positions(),
    })
}

/// Training pipeline for the agent against a single opponent
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play `num_games` games, updating the agent after each one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `report_every` is zero, and
    /// propagates game and observer errors.
    pub fn run<R: Rng>(
        &mut self,
        agent: &mut MenaceAgent<R>,
        opponent: &mut dyn Opponent,
    ) -> Result<TrainingResult> {
        if self.config.report_every == 0 {
            return Err(Error::InvalidConfiguration {
                message: "report_every must be at least 1".to_string(),
            });
        }

        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;
        let mut snapshots = Vec::new();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let record = play_game(agent, opponent)?;
            agent.update(&record.history, record.outcome);

            match record.outcome {
                Outcome::AgentWin => wins += 1,
                Outcome::Draw => draws += 1,
                Outcome::OpponentWin => losses += 1,
            }

            for observer in &mut self.observers {
                observer.on_game_end(game_num, &record)?;
            }

            let played = game_num + 1;
            if played.is_multiple_of(self.config.report_every) || played == self.config.num_games
            {
                let snapshot = Snapshot::new(played, wins, draws, losses);
                for observer in &mut self.observers {
                    observer.on_snapshot(&snapshot)?;
                }
                snapshots.push(snapshot);
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult {
            totals: Snapshot::new(self.config.num_games, wins, draws, losses),
            snapshots,
        })
    }
}

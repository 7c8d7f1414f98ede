//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome as seen by `agent`.
    pub fn relative_to(self, agent: Player) -> crate::menace::Outcome {
        crate::menace::Outcome::from_game(self, agent)
    }
}

/// A game in progress or completed, with its move list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    state: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Game {
            state: BoardState::new(),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Current board state
    pub fn current_state(&self) -> &BoardState {
        &self.state
    }

    /// Whether a terminal state has been reached
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Play a move for the side to move
    ///
    /// # Errors
    ///
    /// Fails with [`crate::Error::NoValidMoves`] once the game is over, and
    /// with the board's error for occupied or out-of-range cells.
    pub fn play(&mut self, position: usize) -> Result<(), crate::Error> {
        if self.is_over() {
            return Err(crate::Error::NoValidMoves);
        }

        let next = self.state.make_move(position)?;
        self.moves.push(Move {
            position,
            player: self.state.to_move,
        });
        self.state = next;
        self.outcome = next.outcome();
        Ok(())
    }

    /// Move positions in play order
    pub fn positions(&self) -> Vec<usize> {
        self.moves.iter().map(|m| m.position).collect()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

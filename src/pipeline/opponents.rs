//! Opponent policies the agent can train against

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    ports::Opponent,
    tictactoe::{BoardState, LineAnalyzer},
};

/// Uniformly random opponent
pub struct RandomOpponent<R = StdRng> {
    rng: R,
}

impl RandomOpponent<StdRng> {
    /// Create a random opponent with a deterministic seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomOpponent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Opponent for RandomOpponent<R> {
    fn select_move(&mut self, state: &BoardState) -> Option<usize> {
        state.empty_positions().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Defensive opponent
///
/// This opponent will:
/// 1. Complete one of its own lines if it can
/// 2. Otherwise block a line the other side could complete next move
/// 3. Otherwise play randomly
pub struct DefensiveOpponent<R = StdRng> {
    rng: R,
}

impl DefensiveOpponent<StdRng> {
    /// Create a defensive opponent with a deterministic seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> DefensiveOpponent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Opponent for DefensiveOpponent<R> {
    fn select_move(&mut self, state: &BoardState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }

        let me = state.to_move;
        if let Some(&win) = LineAnalyzer::winning_moves(&state.cells, me).first() {
            return Some(win);
        }
        if let Some(&block) = LineAnalyzer::winning_moves(&state.cells, me.opponent()).first() {
            return Some(block);
        }

        state.empty_positions().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "defensive"
    }
}

/// Deterministic opponent that always takes the lowest empty cell
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailableOpponent;

impl FirstAvailableOpponent {
    pub fn new() -> Self {
        Self
    }
}

impl Opponent for FirstAvailableOpponent {
    fn select_move(&mut self, state: &BoardState) -> Option<usize> {
        state.empty_positions().first().copied()
    }

    fn name(&self) -> &str {
        "first-available"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_opponent_picks_empty_cells() {
        let mut opponent = RandomOpponent::seeded(7);
        let state = BoardState::from_string("XO.X.O...").unwrap();
        for _ in 0..50 {
            let pos = opponent.select_move(&state).unwrap();
            assert!(state.is_empty(pos));
        }
    }

    #[test]
    fn random_opponent_is_reproducible() {
        let state = BoardState::new().make_move(4).unwrap();
        let a: Vec<_> = {
            let mut o = RandomOpponent::seeded(3);
            (0..10).map(|_| o.select_move(&state)).collect()
        };
        let b: Vec<_> = {
            let mut o = RandomOpponent::seeded(3);
            (0..10).map(|_| o.select_move(&state)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn full_board_has_no_move() {
        let full = BoardState::from_string("XOXXOOOXX").unwrap();
        assert_eq!(RandomOpponent::seeded(1).select_move(&full), None);
        assert_eq!(DefensiveOpponent::seeded(1).select_move(&full), None);
        assert_eq!(FirstAvailableOpponent.select_move(&full), None);
    }

    #[test]
    fn defensive_blocks_open_line() {
        // X threatens 0-1-2, O to move
        let state = BoardState::from_string("XX..O....").unwrap();
        let mut opponent = DefensiveOpponent::seeded(11);
        assert_eq!(opponent.select_move(&state), Some(2));
    }

    #[test]
    fn defensive_prefers_own_win_over_block() {
        // O can finish 3-4-5, X threatens 0-1-2
        let state = BoardState::from_string("XX.OO.X..").unwrap();
        let mut opponent = DefensiveOpponent::seeded(11);
        assert_eq!(opponent.select_move(&state), Some(5));
    }

    #[test]
    fn first_available_takes_lowest_index() {
        let state = BoardState::from_string("X........").unwrap();
        assert_eq!(FirstAvailableOpponent.select_move(&state), Some(1));
    }
}

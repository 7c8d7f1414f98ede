//! MENACE agent that learns to play Tic-Tac-Toe from bead counts.

use std::collections::{BTreeMap, HashMap};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{config::MenaceConfig, matchbox::Matchbox};
use crate::{
    tictactoe::{BoardState, GameOutcome, Player},
    types::CanonicalKey,
};

/// Result of a finished game from the agent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    AgentWin,
    Draw,
    OpponentWin,
}

impl Outcome {
    /// Classify a board-level outcome for the agent playing `agent`.
    pub fn from_game(outcome: GameOutcome, agent: Player) -> Self {
        match outcome {
            GameOutcome::Win(winner) if winner == agent => Outcome::AgentWin,
            GameOutcome::Win(_) => Outcome::OpponentWin,
            GameOutcome::Draw => Outcome::Draw,
        }
    }
}

/// One move made by the agent, recorded in canonical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub key: CanonicalKey,
    pub canonical_move: usize,
}

/// MENACE learning agent
///
/// Owns one [`Matchbox`] per canonical position it has seen and the random
/// source used to draw beads. The RNG is injected so runs can be replayed.
pub struct MenaceAgent<R = StdRng> {
    matchboxes: HashMap<CanonicalKey, Matchbox>,
    config: MenaceConfig,
    rng: R,
    games_trained: usize,
}

impl<R> std::fmt::Debug for MenaceAgent<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenaceAgent")
            .field("config", &self.config)
            .field("matchboxes", &self.matchboxes.len())
            .field("games_trained", &self.games_trained)
            .finish()
    }
}

impl MenaceAgent<StdRng> {
    /// Create an agent seeded from the thread RNG.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: MenaceConfig) -> crate::Result<Self> {
        Self::seeded(config, rand::random::<u64>())
    }

    /// Create an agent with a reproducible seed.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn seeded(config: MenaceConfig, seed: u64) -> crate::Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MenaceAgent<R> {
    /// Create an agent drawing from the given random source.
    ///
    /// # Example
    /// ```
    /// use menace::menace::{MenaceAgent, MenaceConfig};
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let agent = MenaceAgent::with_rng(MenaceConfig::default(), StdRng::seed_from_u64(1))
    ///     .unwrap();
    /// assert_eq!(agent.matchbox_count(), 0);
    /// ```
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn with_rng(config: MenaceConfig, rng: R) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            matchboxes: HashMap::new(),
            config,
            rng,
            games_trained: 0,
        })
    }

    pub fn config(&self) -> &MenaceConfig {
        &self.config
    }

    /// Games fed to [`update`](Self::update) since creation or the last reset
    pub fn games_trained(&self) -> usize {
        self.games_trained
    }

    pub fn matchbox_count(&self) -> usize {
        self.matchboxes.len()
    }

    pub fn matchbox(&self, key: &CanonicalKey) -> Option<&Matchbox> {
        self.matchboxes.get(key)
    }

    pub fn matchboxes(&self) -> impl Iterator<Item = (&CanonicalKey, &Matchbox)> {
        self.matchboxes.iter()
    }

    fn ensure_box(
        matchboxes: &mut HashMap<CanonicalKey, Matchbox>,
        key: CanonicalKey,
        initial_beads: i32,
    ) -> &mut Matchbox {
        matchboxes
            .entry(key)
            .or_insert_with(|| Matchbox::new(key.empty_positions(), initial_beads))
    }

    /// Draw a move for `state`.
    ///
    /// Returns the move in the board's own coordinates together with the
    /// canonical history entry that [`update`](Self::update) expects.
    ///
    /// # Errors
    /// Returns [`crate::Error::NoValidMoves`] if the board has no empty cell.
    pub fn choose_move(&mut self, state: &BoardState) -> crate::Result<(usize, HistoryEntry)> {
        if state.is_full() {
            return Err(crate::Error::NoValidMoves);
        }

        let ctx = state.canonical_context();
        let matchbox = Self::ensure_box(&mut self.matchboxes, ctx.key, self.config.initial_beads);
        let canonical_move = matchbox
            .sample_move(&mut self.rng)
            .ok_or(crate::Error::NoValidMoves)?;

        let entry = HistoryEntry {
            key: ctx.key,
            canonical_move,
        };
        Ok((ctx.map_canonical_to_original(canonical_move), entry))
    }

    /// Reinforce every move of a finished game.
    ///
    /// Entries whose matchbox (or move) is unknown are skipped rather than
    /// reported; counts never drop below [`MIN_BEADS`](super::matchbox::MIN_BEADS).
    pub fn update(&mut self, history: &[HistoryEntry], outcome: Outcome) {
        let delta = self.config.reinforcement.delta(outcome);
        for entry in history {
            if let Some(matchbox) = self.matchboxes.get_mut(&entry.key) {
                matchbox.reinforce(entry.canonical_move, delta);
            }
        }
        self.games_trained += 1;
    }

    /// Bead counts for `state`, keyed by moves in the board's own coordinates.
    ///
    /// Creates the matchbox if this position has not been seen yet.
    ///
    /// # Errors
    /// Returns [`crate::Error::NoValidMoves`] if the board has no empty cell.
    pub fn inspect_box(
        &mut self,
        state: &BoardState,
    ) -> crate::Result<(CanonicalKey, BTreeMap<usize, i32>)> {
        if state.is_full() {
            return Err(crate::Error::NoValidMoves);
        }

        let ctx = state.canonical_context();
        let matchbox = Self::ensure_box(&mut self.matchboxes, ctx.key, self.config.initial_beads);
        let mapping = matchbox
            .all_beads()
            .map(|(pos, count)| (ctx.map_canonical_to_original(pos), count))
            .collect();
        Ok((ctx.key, mapping))
    }

    /// Get statistics about the agent
    pub fn stats(&self) -> AgentStats {
        let total_matchboxes = self.matchboxes.len();
        let total_beads = self.matchboxes.values().map(Matchbox::total_beads).sum();
        let avg_entropy = if total_matchboxes == 0 {
            0.0
        } else {
            self.matchboxes.values().map(Matchbox::entropy).sum::<f64>() / total_matchboxes as f64
        };

        AgentStats {
            total_matchboxes,
            total_beads,
            avg_entropy,
        }
    }

    /// Forget everything learned so far
    pub fn reset(&mut self) {
        self.matchboxes.clear();
        self.games_trained = 0;
    }

    /// Move distribution of a canonical position, as probabilities
    pub fn canonical_distribution(&self, key: &CanonicalKey) -> Option<BTreeMap<usize, f64>> {
        let matchbox = self.matchboxes.get(key)?;
        let weights: Vec<(usize, f64)> = matchbox
            .all_beads()
            .map(|(pos, count)| (pos, f64::from(count.max(super::matchbox::MIN_BEADS))))
            .collect();
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return None;
        }
        Some(weights.into_iter().map(|(pos, w)| (pos, w / total)).collect())
    }
}

/// Statistics about a MENACE agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStats {
    pub total_matchboxes: usize,
    pub total_beads: i64,
    pub avg_entropy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menace::{ReinforcementValues, matchbox::MIN_BEADS};

    fn agent() -> MenaceAgent {
        MenaceAgent::seeded(MenaceConfig::default(), 42).unwrap()
    }

    #[test]
    fn empty_board_box_has_nine_moves_at_initial_count() {
        let mut agent = agent();
        let (key, mapping) = agent.inspect_box(&BoardState::new()).unwrap();

        assert_eq!(key.to_string(), ".........");
        assert_eq!(mapping.len(), 9);
        assert!(mapping.values().all(|&count| count == 4));
        assert_eq!(agent.matchbox_count(), 1);
    }

    #[test]
    fn custom_initial_beads_are_used() {
        let mut agent =
            MenaceAgent::seeded(MenaceConfig::default().with_initial_beads(2), 0).unwrap();
        let (_, mapping) = agent.inspect_box(&BoardState::new()).unwrap();
        assert!(mapping.values().all(|&count| count == 2));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = MenaceAgent::seeded(MenaceConfig::default().with_initial_beads(0), 0);
        assert!(matches!(
            result,
            Err(crate::Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn chosen_move_is_legal_and_logged_canonically() {
        let mut agent = agent();
        let state = BoardState::from_string("XO.......").unwrap();

        for _ in 0..50 {
            let (mv, entry) = agent.choose_move(&state).unwrap();
            assert!(state.is_empty(mv), "move {mv} must be empty");

            let ctx = state.canonical_context();
            assert_eq!(entry.key, ctx.key);
            assert_eq!(ctx.map_move_to_canonical(mv), entry.canonical_move);
        }
        assert_eq!(agent.matchbox_count(), 1);
    }

    #[test]
    fn full_board_is_a_precondition_violation() {
        let mut agent = agent();
        let full = BoardState::from_string("XOXXOOOXX").unwrap();
        assert!(matches!(
            agent.choose_move(&full),
            Err(crate::Error::NoValidMoves)
        ));
        assert!(matches!(
            agent.inspect_box(&full),
            Err(crate::Error::NoValidMoves)
        ));
        assert_eq!(agent.matchbox_count(), 0);
    }

    #[test]
    fn win_adds_three_beads() {
        let mut agent = agent();
        let (_, entry) = agent.choose_move(&BoardState::new()).unwrap();

        agent.update(&[entry], Outcome::AgentWin);

        let matchbox = agent.matchbox(&entry.key).unwrap();
        assert_eq!(matchbox.bead_count(entry.canonical_move), Some(7));
        assert_eq!(agent.games_trained(), 1);
    }

    #[test]
    fn repeated_losses_stop_at_one_bead() {
        let mut agent = agent();
        let (_, entry) = agent.choose_move(&BoardState::new()).unwrap();

        let mut counts = Vec::new();
        for _ in 0..9 {
            agent.update(&[entry], Outcome::OpponentWin);
            counts.push(
                agent
                    .matchbox(&entry.key)
                    .and_then(|m| m.bead_count(entry.canonical_move))
                    .unwrap(),
            );
        }

        assert_eq!(counts, vec![3, 2, 1, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn floor_holds_under_large_penalties() {
        let config = MenaceConfig::default().with_reinforcement(ReinforcementValues {
            win: 3,
            draw: 1,
            loss: -50,
        });
        let mut agent = MenaceAgent::seeded(config, 5).unwrap();
        let (_, entry) = agent.choose_move(&BoardState::new()).unwrap();

        agent.update(&[entry], Outcome::OpponentWin);
        agent.update(&[entry], Outcome::OpponentWin);

        for (_, matchbox) in agent.matchboxes() {
            assert!(matchbox.all_beads().all(|(_, count)| count >= MIN_BEADS));
        }
    }

    #[test]
    fn unknown_history_key_is_skipped() {
        let mut agent = agent();
        let stale = HistoryEntry {
            key: BoardState::from_string("X........")
                .unwrap()
                .canonical_context()
                .key,
            canonical_move: 0,
        };

        agent.update(&[stale], Outcome::AgentWin);

        assert_eq!(agent.matchbox_count(), 0);
        assert_eq!(agent.games_trained(), 1);
    }

    #[test]
    fn inspect_box_reports_original_coordinates() {
        let mut agent = agent();
        let state = BoardState::from_string("X........").unwrap();
        let (key, mapping) = agent.inspect_box(&state).unwrap();

        assert_eq!(key.to_string(), "........X");
        assert_eq!(mapping.keys().copied().collect::<Vec<_>>(), (1..9).collect::<Vec<_>>());
    }

    #[test]
    fn seeded_agents_agree() {
        let mut a = agent();
        let mut b = agent();
        let state = BoardState::new();
        for _ in 0..20 {
            assert_eq!(
                a.choose_move(&state).unwrap().0,
                b.choose_move(&state).unwrap().0
            );
        }
    }

    #[test]
    fn stats_and_reset() {
        let mut agent = agent();
        agent.inspect_box(&BoardState::new()).unwrap();

        let stats = agent.stats();
        assert_eq!(stats.total_matchboxes, 1);
        assert_eq!(stats.total_beads, 36);
        assert!((stats.avg_entropy - 9f64.ln()).abs() < 1e-9);

        let distribution = agent
            .canonical_distribution(&BoardState::new().canonical_context().key)
            .unwrap();
        assert!((distribution.values().sum::<f64>() - 1.0).abs() < 1e-9);

        agent.reset();
        assert_eq!(agent.matchbox_count(), 0);
        assert_eq!(agent.games_trained(), 0);
    }
}

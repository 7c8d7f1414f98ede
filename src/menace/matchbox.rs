//! Matchbox implementation for MENACE

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::{entropy_from_weights, weighted_sample};

/// Smallest bead count a move may hold after reinforcement.
pub const MIN_BEADS: i32 = 1;

/// Beads for every legal move of one canonical position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchbox {
    /// Canonical move position -> bead count
    beads: BTreeMap<usize, i32>,
}

impl Matchbox {
    /// Create a matchbox holding `initial_beads` beads for each legal move.
    pub fn new(legal_moves: impl IntoIterator<Item = usize>, initial_beads: i32) -> Self {
        Matchbox {
            beads: legal_moves
                .into_iter()
                .map(|pos| (pos, initial_beads))
                .collect(),
        }
    }

    /// Get the bead count for a specific position
    pub fn bead_count(&self, position: usize) -> Option<i32> {
        self.beads.get(&position).copied()
    }

    /// Iterate over position-bead pairs in ascending position order
    pub fn all_beads(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.beads.iter().map(|(&pos, &count)| (pos, count))
    }

    /// Number of moves held in the box
    pub fn len(&self) -> usize {
        self.beads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }

    /// Sample a move with probability proportional to its beads.
    ///
    /// Each move counts with at least one bead here. `reinforce` already
    /// keeps counts at [`MIN_BEADS`] or above, so the floor only matters for
    /// boxes whose counts were set some other way.
    pub fn sample_move(&self, rng: &mut impl rand::Rng) -> Option<usize> {
        let items: Vec<(usize, u64)> = self
            .all_beads()
            .map(|(pos, count)| (pos, count.max(MIN_BEADS) as u64))
            .collect();

        weighted_sample(rng, &items)
    }

    /// Add `delta` beads to a move, never leaving fewer than [`MIN_BEADS`].
    ///
    /// Returns the new count, or `None` if the box has no such move.
    pub fn reinforce(&mut self, position: usize, delta: i32) -> Option<i32> {
        let count = self.beads.get_mut(&position)?;
        *count = count.saturating_add(delta).max(MIN_BEADS);
        Some(*count)
    }

    /// Get total bead count
    pub fn total_beads(&self) -> i64 {
        self.beads.values().map(|&count| i64::from(count)).sum()
    }

    /// Shannon entropy of the move distribution
    pub fn entropy(&self) -> f64 {
        entropy_from_weights(self.beads.values().map(|&count| f64::from(count.max(MIN_BEADS))))
    }

    #[cfg(test)]
    pub(crate) fn set_bead_count(&mut self, position: usize, count: i32) {
        self.beads.insert(position, count);
    }
}

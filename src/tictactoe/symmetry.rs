//! Square symmetry operations for board canonicalization
//!
//! The eight symmetries of the square are stored as fixed permutations of the
//! nine board indices. A permutation `P` sends the cell at original index `i`
//! to index `P[i]` of the transformed board.

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Cell};
use crate::types::CanonicalKey;

const PERMUTATIONS: [[usize; 9]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8], // identity
    [6, 3, 0, 7, 4, 1, 8, 5, 2], // rotate 90
    [8, 7, 6, 5, 4, 3, 2, 1, 0], // rotate 180
    [2, 5, 8, 1, 4, 7, 0, 3, 6], // rotate 270
    [2, 1, 0, 5, 4, 3, 8, 7, 6], // reflect horizontal
    [6, 7, 8, 3, 4, 5, 0, 1, 2], // reflect vertical
    [0, 3, 6, 1, 4, 7, 2, 5, 8], // reflect main diagonal
    [8, 5, 2, 7, 4, 1, 6, 3, 0], // reflect anti-diagonal
];

/// One of the eight rotation/reflection symmetries of the board
///
/// Declaration order is the tie-break order used by [`canonicalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    ReflectHorizontal,
    ReflectVertical,
    ReflectMainDiagonal,
    ReflectAntiDiagonal,
}

impl Transform {
    /// All transforms in canonicalization order
    pub const ALL: [Transform; 8] = [
        Transform::Identity,
        Transform::Rotate90,
        Transform::Rotate180,
        Transform::Rotate270,
        Transform::ReflectHorizontal,
        Transform::ReflectVertical,
        Transform::ReflectMainDiagonal,
        Transform::ReflectAntiDiagonal,
    ];

    /// Get all 8 transforms in canonicalization order
    pub fn all() -> [Transform; 8] {
        Self::ALL
    }

    /// Index-to-index permutation of this transform
    pub fn permutation(self) -> &'static [usize; 9] {
        &PERMUTATIONS[self as usize]
    }

    /// Apply transform to a position (0-8)
    pub fn transform_position(self, pos: usize) -> usize {
        self.permutation()[pos]
    }

    /// Inverse permutation `Q`, satisfying `Q[P[i]] == i`
    pub fn inverse_permutation(self) -> [usize; 9] {
        let mut inverse = [0; 9];
        for (original, &image) in self.permutation().iter().enumerate() {
            inverse[image] = original;
        }
        inverse
    }

    /// Map a transformed position back to the original board
    pub fn inverse_position(self, pos: usize) -> usize {
        self.inverse_permutation()[pos]
    }

    /// Apply transform to an array of cells
    pub fn apply(self, cells: &[Cell; 9]) -> [Cell; 9] {
        let mut transformed = [Cell::Empty; 9];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(idx)] = cell;
        }
        transformed
    }
}

/// Result of canonicalizing a position.
///
/// Holds the canonical key together with the transform that produced it so
/// moves can be mapped between original and canonical coordinates without
/// repeating the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalContext {
    /// Lexicographically smallest symmetric image of the position
    pub key: CanonicalKey,
    /// Transform mapping the original position onto `key`
    pub transform: Transform,
}

impl CanonicalContext {
    /// Map a move from original coordinates to canonical coordinates
    pub fn map_move_to_canonical(&self, original_move: usize) -> usize {
        self.transform.transform_position(original_move)
    }

    /// Map a move from canonical coordinates back to original coordinates
    pub fn map_canonical_to_original(&self, canonical_move: usize) -> usize {
        self.transform.inverse_position(canonical_move)
    }
}

/// Reduce a position to its canonical representative.
///
/// Every transform is applied and the smallest image wins; on ties the
/// earliest transform in [`Transform::ALL`] is kept.
pub fn canonicalize(cells: &[Cell; 9]) -> CanonicalContext {
    let mut best = CanonicalContext {
        key: CanonicalKey::new(*cells),
        transform: Transform::Identity,
    };

    for transform in Transform::ALL.into_iter().skip(1) {
        let candidate = CanonicalKey::new(transform.apply(cells));
        if candidate < best.key {
            best = CanonicalContext {
                key: candidate,
                transform,
            };
        }
    }

    best
}

impl BoardState {
    /// Apply a transform to the board, keeping the player to move
    pub fn transform(&self, t: Transform) -> Self {
        BoardState {
            cells: t.apply(&self.cells),
            to_move: self.to_move,
        }
    }
}

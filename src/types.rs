//! Newtype wrappers for improved type safety and domain modeling.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::tictactoe::Cell;

/// Board size constant for Tic-Tac-Toe.
pub const BOARD_SIZE: usize = 9;

/// Symmetry-reduced identifier of a board position.
///
/// Wraps the nine cells of the canonical image. Ordering is lexicographic
/// over the cells, which coincides with ordering the symbol strings
/// produced by [`fmt::Display`].
///
/// # Examples
///
/// ```
/// use menace::tictactoe::BoardState;
///
/// let state = BoardState::from_string("X........").unwrap();
/// let key = state.canonical_context().key;
/// assert_eq!(key.to_string(), "........X");
/// assert_eq!("........X".parse::<menace::CanonicalKey>().unwrap(), key);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CanonicalKey([Cell; BOARD_SIZE]);

impl CanonicalKey {
    /// Wrap cells that are already in canonical form.
    pub(crate) fn new(cells: [Cell; BOARD_SIZE]) -> Self {
        CanonicalKey(cells)
    }

    /// Cells of the canonical position.
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.0
    }

    /// Empty positions of the canonical position, in ascending order.
    pub fn empty_positions(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.0 {
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for CanonicalKey {
    type Err = crate::Error;

    /// Parse a 9-symbol string and reject it unless it is its own canonical form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != BOARD_SIZE {
            return Err(invalid_key(s));
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (cell, &symbol) in cells.iter_mut().zip(&symbols) {
            *cell = Cell::from_char(symbol).ok_or_else(|| invalid_key(s))?;
        }

        let ctx = crate::tictactoe::canonicalize(&cells);
        if ctx.key.0 == cells {
            Ok(ctx.key)
        } else {
            Err(invalid_key(s))
        }
    }
}

fn invalid_key(s: &str) -> crate::Error {
    crate::Error::InvalidCanonicalKey { key: s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_parse() {
        let key: CanonicalKey = "....X...O".parse().unwrap();
        assert_eq!(key.to_string(), "....X...O");
        assert_eq!(key.empty_positions(), vec![0, 1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn parse_rejects_non_canonical_strings() {
        assert!("X........".parse::<CanonicalKey>().is_err());
        assert!("XO".parse::<CanonicalKey>().is_err());
        assert!("....Z....".parse::<CanonicalKey>().is_err());

        let err = "X........".parse::<CanonicalKey>().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidCanonicalKey { ref key } if key == "X........"
        ));
        assert_eq!(err.to_string(), "'X........' is not a canonical board key");
    }

    #[test]
    fn ordering_follows_symbol_order() {
        let a: CanonicalKey = "........O".parse().unwrap();
        let b: CanonicalKey = "........X".parse().unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}

//! Opponent port - the policy the agent trains against

use crate::tictactoe::BoardState;

/// Move policy for the side playing against MENACE
///
/// Implementations must return a legal (empty) position while the board has
/// one, and `None` only when no legal move remains. The training loop treats
/// any other answer as an error.
///
/// # Examples
///
/// ```
/// use menace::{ports::Opponent, tictactoe::BoardState};
///
/// struct LastCell;
///
/// impl Opponent for LastCell {
///     fn select_move(&mut self, state: &BoardState) -> Option<usize> {
///         state.empty_positions().last().copied()
///     }
///
///     fn name(&self) -> &str {
///         "last-cell"
///     }
/// }
///
/// let board = BoardState::new().make_move(8).unwrap();
/// assert_eq!(LastCell.select_move(&board), Some(7));
/// ```
pub trait Opponent: Send {
    /// Pick a move for the side to move, or `None` if none is legal.
    fn select_move(&mut self, state: &BoardState) -> Option<usize>;

    /// Short name used in reports
    fn name(&self) -> &str;
}

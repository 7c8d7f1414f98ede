//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, GameOutcome, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Terminal result of a set of cells.
    ///
    /// Works on any cell layout, including ones that could not arise in play,
    /// so that callers can classify raw positions without validating them.
    /// X is checked first when both sides own a line.
    pub fn outcome(cells: &[Cell; 9]) -> Option<GameOutcome> {
        if Self::has_won(cells, Player::X) {
            Some(GameOutcome::Win(Player::X))
        } else if Self::has_won(cells, Player::O) {
            Some(GameOutcome::Win(Player::O))
        } else if !cells.contains(&Cell::Empty) {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Find all positions that would immediately win for the player, in ascending order
    pub fn winning_moves(cells: &[Cell; 9], player: Player) -> Vec<usize> {
        let mut moves: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(cells, player, line))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    fn winning_move_in_line(cells: &[Cell; 9], player: Player, line: &[usize; 3]) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None,
            }
        }

        if count == 2 { empty_pos } else { None }
    }
}

//! Output formatting for CLI

use std::collections::BTreeMap;

use crate::{pipeline::Snapshot, tictactoe::BoardState};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print final totals of a training run
pub fn print_totals(totals: &Snapshot) {
    print_kv("Games", &format_number(totals.games));
    print_kv(
        "Wins",
        &format!("{} ({:.1}%)", totals.wins, totals.win_rate * 100.0),
    );
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", totals.draws, totals.draw_rate * 100.0),
    );
    print_kv(
        "Losses",
        &format!("{} ({:.1}%)", totals.losses, totals.loss_rate * 100.0),
    );
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Render the board with cell numbers in place of empty squares
pub fn render_numbered(state: &BoardState) -> String {
    let mut out = String::new();
    for row in 0..3 {
        if row > 0 {
            out.push_str("\n---+---+---\n");
        }
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let pos = row * 3 + col;
                if state.is_empty(pos) {
                    format!(" {pos} ")
                } else {
                    format!(" {} ", state.get(pos).to_char())
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
    }
    out
}

/// Render bead counts laid out on the grid, `-` for occupied cells
pub fn render_beads(state: &BoardState, beads: &BTreeMap<usize, i32>) -> String {
    let width = beads
        .values()
        .map(|count| count.to_string().len())
        .max()
        .unwrap_or(1)
        .max(1);

    (0..3)
        .map(|row| {
            (0..3)
                .map(|col| {
                    let pos = row * 3 + col;
                    match beads.get(&pos) {
                        Some(count) => format!("{count:>width$}"),
                        None if state.is_empty(pos) => format!("{:>width$}", "?"),
                        None => format!("{:>width$}", "-"),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(3000), "3,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn numbered_board_shows_free_cells() {
        let state = BoardState::from_string("X...O....").unwrap();
        let rendered = render_numbered(&state);
        assert!(rendered.starts_with(" X | 1 | 2 "));
        assert!(rendered.contains(" 3 | O | 5 "));
    }

    #[test]
    fn bead_grid_marks_occupied_cells() {
        let state = BoardState::from_string("X........").unwrap();
        let beads: BTreeMap<usize, i32> = (1..9).map(|pos| (pos, 4)).collect();
        assert_eq!(render_beads(&state, &beads), "- 4 4\n4 4 4\n4 4 4");
    }
}

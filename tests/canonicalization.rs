//! Symmetry canonicalization over every reachable position

use std::collections::HashSet;

use menace::{
    CanonicalKey,
    tictactoe::{BoardState, Transform, canonicalize},
};

/// Every position reachable by legal play from the empty board, terminal
/// positions included.
fn reachable_positions() -> Vec<BoardState> {
    let mut seen = HashSet::new();
    let mut stack = vec![BoardState::new()];
    let mut positions = Vec::new();

    while let Some(state) = stack.pop() {
        if !seen.insert(state.encode()) {
            continue;
        }
        positions.push(state);
        if state.is_terminal() {
            continue;
        }
        for pos in state.legal_moves() {
            stack.push(state.make_move(pos).unwrap());
        }
    }

    positions
}

#[test]
fn reachable_position_counts() {
    let positions = reachable_positions();
    assert_eq!(positions.len(), 5478);

    let keys: HashSet<CanonicalKey> = positions
        .iter()
        .map(|state| canonicalize(&state.cells).key)
        .collect();
    assert_eq!(keys.len(), 765);
}

#[test]
fn key_is_invariant_under_all_transforms() {
    for state in reachable_positions() {
        let key = canonicalize(&state.cells).key;
        for t in Transform::all() {
            let image = state.transform(t);
            assert_eq!(
                canonicalize(&image.cells).key,
                key,
                "{} under {t:?}",
                state.encode()
            );
        }
    }
}

#[test]
fn key_is_its_own_canonical_form() {
    for state in reachable_positions() {
        let key = canonicalize(&state.cells).key;
        assert_eq!(canonicalize(key.cells()).key, key);
        assert_eq!(key.to_string().parse::<CanonicalKey>().unwrap(), key);
    }
}

#[test]
fn moves_round_trip_through_canonical_space() {
    for state in reachable_positions() {
        let ctx = state.canonical_context();
        for pos in 0..9 {
            let canonical = ctx.map_move_to_canonical(pos);
            assert_eq!(ctx.map_canonical_to_original(canonical), pos);
            assert_eq!(ctx.key.cells()[canonical], state.cells[pos]);
        }
    }
}

#[test]
fn canonical_key_is_the_smallest_image() {
    for state in reachable_positions() {
        let key = canonicalize(&state.cells).key;
        let smallest = Transform::all()
            .into_iter()
            .map(|t| t.apply(&state.cells))
            .min()
            .unwrap();
        assert_eq!(key.cells(), &smallest);
    }
}

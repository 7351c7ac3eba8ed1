//! Property-based tests for round resolution.
//!
//! These tests verify invariants that must hold for any command batch.
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use memgrid::game::{check_invariants, ResponseKind};
use memgrid::{CellState, Command, Game, PlayerId};

const PLAYERS: u32 = 3;

fn cell_state() -> impl Strategy<Value = CellState> {
    prop_oneof![
        4 => Just(CellState::Free),
        1 => Just(CellState::Corrupt),
        1 => Just(CellState::System),
    ]
}

fn grid(max_blocks: usize) -> impl Strategy<Value = Vec<CellState>> {
    (1..=max_blocks).prop_flat_map(|blocks| prop::collection::vec(cell_state(), blocks * 4))
}

/// A grid together with an index inside it.
fn grid_with_cell(max_blocks: usize) -> impl Strategy<Value = (Vec<CellState>, usize)> {
    grid(max_blocks).prop_flat_map(|cells| {
        let len = cells.len();
        (Just(cells), 0..len)
    })
}

fn cell_refs() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-2i64..20, 0..4)
}

/// Commands from registered players plus one unregistered id.
fn command() -> impl Strategy<Value = Command> {
    let player = 0..=PLAYERS;
    (player, 0u8..7, cell_refs(), -2i64..20).prop_map(|(player, kind, cells, cell)| match kind {
        0 => Command::stats(player),
        1 => Command::scan(player, cell),
        2 => Command::allocate(player, cells),
        3 => Command::free(player, cells),
        4 => Command::recover(player, cells),
        5 => Command::fortify(player, cells),
        _ => Command::swap(player, cells),
    })
}

fn batches() -> impl Strategy<Value = Vec<Vec<Command>>> {
    prop::collection::vec(prop::collection::vec(command(), 0..8), 1..6)
}

fn new_game(cells: Vec<CellState>) -> Game {
    let mut game = Game::new();
    for i in 0..PLAYERS {
        game.register_player(format!("p{i}"));
    }
    game.start_game(cells, 10).unwrap();
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Ownership only ever sits on allocated or fortified cells.
    #[test]
    fn prop_owner_implies_ownable_state(cells in grid(4), rounds in batches()) {
        let mut game = new_game(cells);
        for batch in &rounds {
            game.resolve_round(batch).unwrap();
            let grid = game.grid().unwrap();
            for (index, state, owner) in grid.iter() {
                prop_assert!(
                    owner.is_none() || state.is_ownable(),
                    "cell {} is {:?} with owner {:?}", index, state, owner
                );
            }
            prop_assert!(check_invariants(&game).is_empty());
        }
    }

    /// Every call advances the round counter by exactly one.
    #[test]
    fn prop_round_counter_advances_once(cells in grid(2), rounds in batches()) {
        let mut game = new_game(cells);
        for (i, batch) in rounds.iter().enumerate() {
            game.resolve_round(batch).unwrap();
            prop_assert_eq!(game.round() as usize, i + 1);
        }
    }

    /// Grid length and system cells never change.
    #[test]
    fn prop_grid_shape_and_system_cells_fixed(cells in grid(4), rounds in batches()) {
        let system: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == CellState::System)
            .map(|(i, _)| i)
            .collect();
        let len = cells.len();
        let mut game = new_game(cells);
        for batch in &rounds {
            game.resolve_round(batch).unwrap();
        }
        let grid = game.grid().unwrap();
        prop_assert_eq!(grid.len(), len);
        for index in system {
            prop_assert_eq!(grid.state(index), Some(CellState::System));
        }
    }

    /// At most one response per registered player; none for strangers.
    #[test]
    fn prop_one_response_per_player(cells in grid(2), batch in prop::collection::vec(command(), 0..12)) {
        let mut game = new_game(cells);
        let responses = game.resolve_round(&batch).unwrap();
        let mut seen: Vec<PlayerId> = responses.iter().map(|r| r.player).collect();
        prop_assert!(seen.iter().all(|&p| p < PLAYERS));
        let count = seen.len();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), count);
    }

    /// Scanning any cell of a block gives the same aligned view.
    #[test]
    fn prop_scan_is_block_aligned(cells in grid(4), setup in batches(), cell in 0i64..16) {
        let mut game = new_game(cells);
        for batch in &setup {
            game.resolve_round(batch).unwrap();
        }
        let aligned = cell - cell % 4;
        let responses = game
            .resolve_round(&[Command::scan(0, cell), Command::scan(1, aligned)])
            .unwrap();
        let (ResponseKind::Scan(a), ResponseKind::Scan(b)) = (&responses[0].kind, &responses[1].kind) else {
            panic!("expected scans");
        };
        prop_assert_eq!(a.cell, b.cell);
        if game.grid().unwrap().index_valid(cell) {
            prop_assert_eq!(a.states.len(), 4);
            prop_assert_eq!(a.cell, aligned);
        } else {
            prop_assert!(a.is_out_of_bounds());
            prop_assert!(a.states.is_empty());
        }
    }

    /// Two players hitting the same non-fortified, non-system cell corrupt it.
    #[test]
    fn prop_contention_corrupts(
        (mut cells, k) in grid_with_cell(2),
        first in 2u8..7,
        second in 2u8..7,
    ) {
        if cells[k] == CellState::System {
            cells[k] = CellState::Free;
        }
        let len = cells.len();
        let mut game = new_game(cells);
        let idx = i64::try_from(k).unwrap();
        let partner = i64::try_from((k + 1) % len).unwrap();
        let make = |player: PlayerId, kind: u8| match kind {
            2 => Command::allocate(player, [idx]),
            3 => Command::free(player, [idx]),
            4 => Command::recover(player, [idx]),
            5 => Command::fortify(player, [idx]),
            _ => Command::swap(player, [idx, partner]),
        };

        game.resolve_round(&[make(0, first), make(1, second)]).unwrap();
        let grid = game.grid().unwrap();
        prop_assert_eq!(grid.state(k), Some(CellState::Corrupt));
        prop_assert_eq!(grid.owner(k), None);
    }

    /// Scores are derived, so re-querying never changes them.
    #[test]
    fn prop_scores_stable_and_complete(cells in grid(4), rounds in batches()) {
        let mut game = new_game(cells);
        for batch in &rounds {
            game.resolve_round(batch).unwrap();
        }
        let first = game.get_scores();
        prop_assert_eq!(first.len(), PLAYERS as usize);
        prop_assert_eq!(&first, &game.get_scores());

        let owned: u32 = first.iter().map(|s| s.owned_cells).sum();
        let grid = game.grid().unwrap();
        prop_assert_eq!(owned as usize, grid.owners().iter().filter(|o| o.is_some()).count());
        for score in &first {
            prop_assert_eq!(score.total_score, score.owned_cells + 4 * score.owned_blocks);
        }
    }
}

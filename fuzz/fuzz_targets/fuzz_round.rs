#![no_main]

//! Round resolution fuzzer.
//!
//! Builds a small grid, registers a few players and resolves arbitrary
//! command batches, checking after every round that:
//! 1. Ownership only sits on allocated or fortified cells
//! 2. System cells never change
//! 3. The round counter advances by exactly one

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use memgrid::game::check_invariants;
use memgrid::{CellState, Command, Game};

/// A fuzzer-generated command.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzCommand {
    Stats,
    Scan(i8),
    Allocate(Vec<i8>),
    Free(Vec<i8>),
    Recover(Vec<i8>),
    Fortify(Vec<i8>),
    Swap(Vec<i8>),
}

impl FuzzCommand {
    fn into_command(self, player: u32) -> Command {
        let widen = |cells: Vec<i8>| cells.into_iter().take(6).map(i64::from).collect::<Vec<_>>();
        match self {
            Self::Stats => Command::stats(player),
            Self::Scan(cell) => Command::scan(player, i64::from(cell)),
            Self::Allocate(cells) => Command::allocate(player, widen(cells)),
            Self::Free(cells) => Command::free(player, widen(cells)),
            Self::Recover(cells) => Command::recover(player, widen(cells)),
            Self::Fortify(cells) => Command::fortify(player, widen(cells)),
            Self::Swap(cells) => Command::swap(player, widen(cells)),
        }
    }
}

/// Structured input for round fuzzing.
#[derive(Arbitrary, Debug)]
struct RoundInput {
    /// Initial cell kinds, 0..=2 mapping to free, corrupt, system.
    cells: Vec<u8>,
    /// Number of registered players.
    players: u8,
    /// Batches of (player, command) pairs.
    rounds: Vec<Vec<(u8, FuzzCommand)>>,
}

fuzz_target!(|input: RoundInput| {
    let blocks = (input.cells.len() / 4).clamp(1, 16);
    let cells: Vec<CellState> = (0..blocks * 4)
        .map(|i| match input.cells.get(i).copied().unwrap_or(0) % 8 {
            6 => CellState::Corrupt,
            7 => CellState::System,
            _ => CellState::Free,
        })
        .collect();

    let mut game = Game::new();
    let players = (input.players % 4).max(1);
    for i in 0..players {
        game.register_player(format!("p{i}"));
    }
    if game.start_game(cells.clone(), 20).is_err() {
        return;
    }

    for batch in input.rounds.into_iter().take(20) {
        let commands: Vec<Command> = batch
            .into_iter()
            .take(12)
            // Allow one unregistered id through.
            .map(|(player, cmd)| cmd.into_command(u32::from(player % (players + 1))))
            .collect();

        let before = game.round();
        let Ok(responses) = game.resolve_round(&commands) else {
            panic!("resolve_round failed on a started game");
        };
        assert_eq!(game.round(), before + 1);
        assert!(responses.len() <= usize::from(players));

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");

        let Some(grid) = game.grid() else {
            panic!("started game has no grid");
        };
        for (index, state) in cells.iter().enumerate() {
            if *state == CellState::System {
                assert_eq!(grid.state(index), Some(CellState::System));
            }
        }
    }

    let scores = game.get_scores();
    assert_eq!(scores.len(), usize::from(players));
});

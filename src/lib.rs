// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Memgrid: a deterministic round-resolution engine for a contested memory grid.
//!
//! Players share a fixed grid of cells split into blocks of four. Each round
//! every player submits at most one command; the engine resolves the whole
//! batch at once:
//! - cells named by more than one mutating command are corrupted
//! - mutating commands run before observing ones
//! - scores are derived from the grid on demand
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Host (CLI, replay, transport)     │
//! ├─────────────────────────────────────┤
//! │   Round orchestration + scoring     │
//! ├─────────────────────────────────────┤
//! │   Command executor + conflicts      │
//! ├─────────────────────────────────────┤
//! │   Grid + ownership map              │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use memgrid::{CellState, Command, Game};
//!
//! let mut game = Game::new();
//! let alice = game.register_player("alice").id();
//! game.start_game(vec![CellState::Free; 8], 10).unwrap();
//!
//! let responses = game.resolve_round(&[Command::allocate(alice, [0, 1])]).unwrap();
//! assert_eq!(responses[0].success_cells(), Some(&[0, 1][..]));
//! assert_eq!(game.get_scores()[0].total_score, 2);
//! ```

pub mod error;
pub mod game;
pub mod mapgen;
pub mod render;
pub mod replay;

pub use error::{GameError, GameResult};

// Re-export key game types at crate root for convenience
pub use game::{
    CellState, Command, CommandKind, Game, Grid, ObservedState, Player, PlayerHandle, PlayerId,
    PlayerScore, Response, ResponseKind, RuleConfig,
};

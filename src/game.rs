//! Game layer for memgrid.
//!
//! Implements the round rules on top of the grid:
//! - Grid of cell states with a parallel ownership map
//! - Contention detection across a round's mutating commands
//! - Per-command validation and transitions
//! - Round orchestration (dedup, ordering, execution)
//! - Block-based scoring

mod cell;
mod command;
mod conflict;
mod executor;
mod grid;
mod invariants;
mod player;
mod rules;
mod scoring;
mod state;

pub use cell::{CellState, ObservedState};
pub use command::{
    CellRef, Command, CommandKind, Response, ResponseKind, ScanReport, StatsReport,
};
pub use conflict::ContestedCells;
pub use executor::{execute, scan, stats, RoundContext};
pub use grid::{block_of, block_start, Grid, StateCounts, BLOCK_SIZE};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use player::{Player, PlayerHandle, PlayerId};
pub use rules::{RuleConfig, RulesError, DEFAULT_MAX_CELLS_PER_COMMAND};
pub use scoring::{compute_scores, PlayerScore, BLOCK_BONUS};
pub use state::{Board, Game};

//! Player commands and the responses they produce.

use serde::{Deserialize, Serialize};

use crate::game::{ObservedState, PlayerId};

/// Cell index as supplied by a player. May be negative or out of range.
pub type CellRef = i64;

/// What a command asks the engine to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandKind {
    /// Report grid-wide statistics.
    Stats,
    /// Observe the block containing `cell`.
    Scan {
        /// Any cell of the block to observe.
        cell: CellRef,
    },
    /// Claim free cells within one block.
    Allocate {
        /// Target cells.
        cells: Vec<CellRef>,
    },
    /// Release cells back to `FREE`.
    Free {
        /// Target cells.
        cells: Vec<CellRef>,
    },
    /// Reclaim corrupt cells.
    Recover {
        /// Target cells.
        cells: Vec<CellRef>,
    },
    /// Harden allocated cells.
    Fortify {
        /// Target cells.
        cells: Vec<CellRef>,
    },
    /// Exchange two cells.
    Swap {
        /// Exactly two target cells.
        cells: Vec<CellRef>,
    },
}

impl CommandKind {
    /// Check if this command can change the grid.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, CommandKind::Stats | CommandKind::Scan { .. })
    }

    /// Cells a mutating command declares, as submitted.
    ///
    /// Observing commands declare none.
    #[must_use]
    pub fn declared_cells(&self) -> &[CellRef] {
        match self {
            CommandKind::Stats | CommandKind::Scan { .. } => &[],
            CommandKind::Allocate { cells }
            | CommandKind::Free { cells }
            | CommandKind::Recover { cells }
            | CommandKind::Fortify { cells }
            | CommandKind::Swap { cells } => cells,
        }
    }

    /// Short lowercase name, used in logs and text output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            CommandKind::Stats => "stats",
            CommandKind::Scan { .. } => "scan",
            CommandKind::Allocate { .. } => "allocate",
            CommandKind::Free { .. } => "free",
            CommandKind::Recover { .. } => "recover",
            CommandKind::Fortify { .. } => "fortify",
            CommandKind::Swap { .. } => "swap",
        }
    }
}

/// A command issued by a player for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Issuing player.
    pub player: PlayerId,
    /// Requested action.
    #[serde(flatten)]
    pub kind: CommandKind,
}

impl Command {
    /// Create a command.
    #[must_use]
    pub const fn new(player: PlayerId, kind: CommandKind) -> Self {
        Self { player, kind }
    }

    /// `Stats` command.
    #[must_use]
    pub const fn stats(player: PlayerId) -> Self {
        Self::new(player, CommandKind::Stats)
    }

    /// `Scan` command.
    #[must_use]
    pub const fn scan(player: PlayerId, cell: CellRef) -> Self {
        Self::new(player, CommandKind::Scan { cell })
    }

    /// `Allocate` command.
    #[must_use]
    pub fn allocate(player: PlayerId, cells: impl Into<Vec<CellRef>>) -> Self {
        Self::new(player, CommandKind::Allocate { cells: cells.into() })
    }

    /// `Free` command.
    #[must_use]
    pub fn free(player: PlayerId, cells: impl Into<Vec<CellRef>>) -> Self {
        Self::new(player, CommandKind::Free { cells: cells.into() })
    }

    /// `Recover` command.
    #[must_use]
    pub fn recover(player: PlayerId, cells: impl Into<Vec<CellRef>>) -> Self {
        Self::new(player, CommandKind::Recover { cells: cells.into() })
    }

    /// `Fortify` command.
    #[must_use]
    pub fn fortify(player: PlayerId, cells: impl Into<Vec<CellRef>>) -> Self {
        Self::new(player, CommandKind::Fortify { cells: cells.into() })
    }

    /// `Swap` command.
    #[must_use]
    pub fn swap(player: PlayerId, cells: impl Into<Vec<CellRef>>) -> Self {
        Self::new(player, CommandKind::Swap { cells: cells.into() })
    }

    /// Check if this command can change the grid.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        self.kind.is_mutating()
    }
}

/// Grid-wide statistics returned by a `Stats` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Total number of cells.
    pub cell_count: usize,
    /// Cells in `FREE`.
    pub free_cells: usize,
    /// Cells in `ALLOCATED`.
    pub allocated_cells: usize,
    /// Cells in `CORRUPT`.
    pub corrupt_cells: usize,
    /// Cells in `FORTIFIED`.
    pub fortified_cells: usize,
    /// Cells in `SYSTEM`.
    pub system_cells: usize,
    /// Cells owned by the requesting player.
    pub owned_cells: usize,
    /// Rounds left before the advisory round limit; negative once it is passed.
    pub rounds_remaining: i64,
}

/// Block view returned by a `Scan` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// First cell of the scanned block, or [`ScanReport::OUT_OF_BOUNDS`].
    pub cell: i64,
    /// States of the block's cells in index order, projected for the observer.
    pub states: Vec<ObservedState>,
}

impl ScanReport {
    /// Sentinel index reported for an out-of-bounds scan.
    pub const OUT_OF_BOUNDS: i64 = -1;

    /// The empty report for an out-of-bounds scan.
    #[must_use]
    pub const fn out_of_bounds() -> Self {
        Self {
            cell: Self::OUT_OF_BOUNDS,
            states: Vec::new(),
        }
    }

    /// Check if this is the out-of-bounds sentinel.
    #[must_use]
    pub const fn is_out_of_bounds(&self) -> bool {
        self.cell == Self::OUT_OF_BOUNDS
    }
}

/// Payload of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseKind {
    /// Answer to `Stats`.
    Stats(StatsReport),
    /// Answer to `Scan`.
    Scan(ScanReport),
    /// Cells a mutating command changed successfully.
    Success {
        /// Successful cell indices, in processing order.
        cells: Vec<usize>,
    },
}

/// One response per honored command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Player that issued the command.
    pub player: PlayerId,
    /// Command outcome.
    #[serde(flatten)]
    pub kind: ResponseKind,
}

impl Response {
    /// Successful cells, if this answers a mutating command.
    #[must_use]
    pub fn success_cells(&self) -> Option<&[usize]> {
        match &self.kind {
            ResponseKind::Success { cells } => Some(cells),
            ResponseKind::Stats(_) | ResponseKind::Scan(_) => None,
        }
    }

    /// Stats report, if this answers `Stats`.
    #[must_use]
    pub const fn stats(&self) -> Option<&StatsReport> {
        match &self.kind {
            ResponseKind::Stats(report) => Some(report),
            _ => None,
        }
    }

    /// Scan report, if this answers `Scan`.
    #[must_use]
    pub const fn scan(&self) -> Option<&ScanReport> {
        match &self.kind {
            ResponseKind::Scan(report) => Some(report),
            _ => None,
        }
    }
}

//! Per-command validation and state transitions.
//!
//! Every handler treats bad input as a no-op: an invalid argument list voids
//! the command (empty success list), an invalid single index is skipped.
//! Contention is applied per cell before the command's own transition.

use crate::game::{
    block_of, block_start, CellRef, CellState, Command, CommandKind, ContestedCells, Grid,
    ObservedState, PlayerId, Response, ResponseKind, RuleConfig, ScanReport, StatsReport,
    BLOCK_SIZE,
};

/// Read-only inputs shared by every command in a round.
#[derive(Debug, Clone, Copy)]
pub struct RoundContext<'a> {
    /// Cells named by more than one mutating command this round.
    pub contested: &'a ContestedCells,
    /// Argument limits.
    pub rules: &'a RuleConfig,
    /// Advisory rounds left, reported by `Stats`.
    pub rounds_remaining: i64,
}

/// Execute one command against the grid and build its response.
pub fn execute(grid: &mut Grid, ctx: &RoundContext<'_>, command: &Command) -> Response {
    let player = command.player;
    let kind = match &command.kind {
        CommandKind::Stats => ResponseKind::Stats(stats(grid, ctx, player)),
        CommandKind::Scan { cell } => ResponseKind::Scan(scan(grid, player, *cell)),
        CommandKind::Allocate { cells } => success(allocate(grid, ctx, player, cells)),
        CommandKind::Free { cells } => success(free(grid, ctx, cells)),
        CommandKind::Recover { cells } => success(recover(grid, ctx, player, cells)),
        CommandKind::Fortify { cells } => success(fortify(grid, ctx, cells)),
        CommandKind::Swap { cells } => success(swap(grid, ctx, cells)),
    };
    Response { player, kind }
}

fn success(cells: Vec<usize>) -> ResponseKind {
    ResponseKind::Success { cells }
}

/// Drop repeated indices, keeping first-occurrence order.
fn distinct(cells: &[CellRef]) -> Vec<CellRef> {
    let mut out = Vec::with_capacity(cells.len());
    for &cell in cells {
        if !out.contains(&cell) {
            out.push(cell);
        }
    }
    out
}

/// Distinct in-bounds indices, in first-occurrence order.
fn in_bounds(grid: &Grid, cells: &[CellRef]) -> Vec<usize> {
    distinct(cells)
        .into_iter()
        .filter_map(|cell| grid.index(cell))
        .collect()
}

/// Grid-wide statistics for the requester.
#[must_use]
pub fn stats(grid: &Grid, ctx: &RoundContext<'_>, player: PlayerId) -> StatsReport {
    let counts = grid.state_counts();
    StatsReport {
        cell_count: grid.len(),
        free_cells: counts.free,
        allocated_cells: counts.allocated,
        corrupt_cells: counts.corrupt,
        fortified_cells: counts.fortified,
        system_cells: counts.system,
        owned_cells: grid.count_owned(player),
        rounds_remaining: ctx.rounds_remaining,
    }
}

/// Block view around `cell`, with ownership revealed only to its owner.
#[must_use]
pub fn scan(grid: &Grid, player: PlayerId, cell: CellRef) -> ScanReport {
    let Some(index) = grid.index(cell) else {
        return ScanReport::out_of_bounds();
    };

    let start = block_start(index);
    let states = (start..start + BLOCK_SIZE)
        .filter_map(|i| {
            let state = grid.state(i)?;
            Some(ObservedState::observe(state, grid.owner(i) == Some(player)))
        })
        .collect();

    ScanReport {
        cell: i64::try_from(start).unwrap_or(ScanReport::OUT_OF_BOUNDS),
        states,
    }
}

/// Claim up to `max_cells_per_command` cells of a single block.
fn allocate(
    grid: &mut Grid,
    ctx: &RoundContext<'_>,
    player: PlayerId,
    cells: &[CellRef],
) -> Vec<usize> {
    if cells.is_empty() || cells.len() > ctx.rules.max_cells_per_command {
        return Vec::new();
    }
    let Some(indices) = distinct(cells)
        .into_iter()
        .map(|cell| grid.index(cell))
        .collect::<Option<Vec<_>>>()
    else {
        return Vec::new();
    };
    let block = block_of(indices[0]);
    if indices.iter().any(|&i| block_of(i) != block) {
        return Vec::new();
    }

    let mut succeeded = Vec::with_capacity(indices.len());
    for index in indices {
        if ctx.contested.contains(index) {
            grid.corrupt(index);
            continue;
        }
        match grid.state(index) {
            Some(CellState::Free) => {
                grid.set(index, CellState::Allocated, Some(player));
                succeeded.push(index);
            }
            // Allocating over an existing allocation is a collision.
            Some(CellState::Allocated) => {
                grid.set(index, CellState::Corrupt, None);
            }
            _ => {}
        }
    }
    succeeded
}

/// Release cells to `FREE`, whoever holds them.
fn free(grid: &mut Grid, ctx: &RoundContext<'_>, cells: &[CellRef]) -> Vec<usize> {
    if cells.len() > ctx.rules.max_cells_per_command {
        return Vec::new();
    }

    let mut succeeded = Vec::new();
    for index in in_bounds(grid, cells) {
        if ctx.contested.contains(index) {
            grid.corrupt(index);
            continue;
        }
        if matches!(
            grid.state(index),
            Some(CellState::Allocated | CellState::Corrupt | CellState::Free)
        ) {
            grid.set(index, CellState::Free, None);
            succeeded.push(index);
        }
    }
    succeeded
}

/// Reclaim corrupt cells; recovering a live or owned cell corrupts it.
fn recover(
    grid: &mut Grid,
    ctx: &RoundContext<'_>,
    player: PlayerId,
    cells: &[CellRef],
) -> Vec<usize> {
    if cells.len() > ctx.rules.max_cells_per_command {
        return Vec::new();
    }

    let mut succeeded = Vec::new();
    for index in in_bounds(grid, cells) {
        if ctx.contested.contains(index) {
            grid.corrupt(index);
            continue;
        }
        match grid.state(index) {
            Some(CellState::Corrupt) => {
                grid.set(index, CellState::Allocated, Some(player));
                succeeded.push(index);
            }
            Some(CellState::Allocated) => {
                grid.set(index, CellState::Corrupt, None);
            }
            Some(_) if grid.owner(index).is_some() => {
                grid.set(index, CellState::Corrupt, None);
            }
            _ => {}
        }
    }
    succeeded
}

/// Harden allocated cells, keeping their owner.
fn fortify(grid: &mut Grid, ctx: &RoundContext<'_>, cells: &[CellRef]) -> Vec<usize> {
    if !ctx.rules.fortify_allows(cells.len()) {
        return Vec::new();
    }

    let mut succeeded = Vec::new();
    for index in in_bounds(grid, cells) {
        if ctx.contested.contains(index) {
            // No-op for cells that are already fortified.
            grid.corrupt(index);
            continue;
        }
        if grid.state(index) == Some(CellState::Allocated) {
            grid.set_state(index, CellState::Fortified);
            succeeded.push(index);
        }
    }
    succeeded
}

/// Exchange two cells' states and owners.
fn swap(grid: &mut Grid, ctx: &RoundContext<'_>, cells: &[CellRef]) -> Vec<usize> {
    let &[first, second] = cells else {
        return Vec::new();
    };
    let (Some(a), Some(b)) = (grid.index(first), grid.index(second)) else {
        return Vec::new();
    };
    if a == b {
        return Vec::new();
    }

    if ctx.contested.contains(a) || ctx.contested.contains(b) {
        grid.corrupt(a);
        grid.corrupt(b);
        return Vec::new();
    }

    let swappable = [a, b]
        .iter()
        .all(|&i| grid.state(i).is_some_and(CellState::is_swappable));
    if !swappable {
        return Vec::new();
    }

    grid.swap(a, b);
    vec![a, b]
}

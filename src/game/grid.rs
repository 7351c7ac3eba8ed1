//! The memory grid and its ownership map.

use crate::error::{GameError, GameResult};
use crate::game::{CellState, PlayerId};

/// Number of cells in a block.
pub const BLOCK_SIZE: usize = 4;

/// Get the block a cell belongs to.
#[must_use]
#[inline]
pub const fn block_of(index: usize) -> usize {
    index / BLOCK_SIZE
}

/// Get the first cell of the block containing `index`.
#[must_use]
#[inline]
pub const fn block_start(index: usize) -> usize {
    block_of(index) * BLOCK_SIZE
}

/// Per-state cell counts over the whole grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    /// Cells in `FREE`.
    pub free: usize,
    /// Cells in `ALLOCATED`.
    pub allocated: usize,
    /// Cells in `CORRUPT`.
    pub corrupt: usize,
    /// Cells in `FORTIFIED`.
    pub fortified: usize,
    /// Cells in `SYSTEM`.
    pub system: usize,
}

impl StateCounts {
    /// Count for a single state.
    #[must_use]
    pub const fn get(&self, state: CellState) -> usize {
        match state {
            CellState::Free => self.free,
            CellState::Allocated => self.allocated,
            CellState::Corrupt => self.corrupt,
            CellState::Fortified => self.fortified,
            CellState::System => self.system,
        }
    }

    fn bump(&mut self, state: CellState) {
        match state {
            CellState::Free => self.free += 1,
            CellState::Allocated => self.allocated += 1,
            CellState::Corrupt => self.corrupt += 1,
            CellState::Fortified => self.fortified += 1,
            CellState::System => self.system += 1,
        }
    }
}

/// Fixed-length grid of cell states with a parallel ownership map.
///
/// Every write goes through [`Grid::set`], which drops the owner whenever the
/// new state cannot carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Cell states in index order.
    cells: Vec<CellState>,
    /// Owner of each cell, parallel to `cells`.
    owners: Vec<Option<PlayerId>>,
}

impl Grid {
    /// Create a grid from initial states with no owners.
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is empty or its length is not a multiple
    /// of [`BLOCK_SIZE`].
    pub fn new(cells: Vec<CellState>) -> GameResult<Self> {
        if cells.is_empty() {
            return Err(GameError::EmptyGrid);
        }
        if cells.len() % BLOCK_SIZE != 0 {
            return Err(GameError::MisalignedGrid(cells.len()));
        }

        let owners = vec![None; cells.len()];
        Ok(Self { cells, owners })
    }

    /// Create a grid of `len` free cells.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grid::new`].
    pub fn free(len: usize) -> GameResult<Self> {
        Self::new(vec![CellState::Free; len])
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; grids are non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.cells.len() / BLOCK_SIZE
    }

    /// Check if a signed index addresses a cell.
    #[must_use]
    pub fn index_valid(&self, index: i64) -> bool {
        self.index(index).is_some()
    }

    /// Convert a signed, player-supplied index into a cell index.
    #[must_use]
    #[inline]
    pub fn index(&self, index: i64) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.cells.len())
    }

    /// Get the state of a cell.
    #[must_use]
    #[inline]
    pub fn state(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).copied()
    }

    /// Get the owner of a cell.
    #[must_use]
    #[inline]
    pub fn owner(&self, index: usize) -> Option<PlayerId> {
        self.owners.get(index).copied().flatten()
    }

    /// Set a cell's state and owner.
    ///
    /// The owner is discarded if `state` cannot carry one. Returns `false`
    /// if the index is out of bounds.
    pub fn set(&mut self, index: usize, state: CellState, owner: Option<PlayerId>) -> bool {
        if index >= self.cells.len() {
            return false;
        }
        self.cells[index] = state;
        self.owners[index] = if state.is_ownable() { owner } else { None };
        true
    }

    /// Change a cell's state, keeping its owner where the new state allows.
    pub fn set_state(&mut self, index: usize, state: CellState) -> bool {
        let owner = self.owner(index);
        self.set(index, state, owner)
    }

    /// Corrupt a cell as a contention penalty.
    ///
    /// Fortified and system cells are left untouched. Returns `true` if the
    /// cell was changed.
    pub fn corrupt(&mut self, index: usize) -> bool {
        match self.state(index) {
            Some(state) if state.is_corruptible() => self.set(index, CellState::Corrupt, None),
            _ => false,
        }
    }

    /// Exchange state and owner of two cells.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.cells.len() && b < self.cells.len() {
            self.cells.swap(a, b);
            self.owners.swap(a, b);
        }
    }

    /// Raw cell states, in index order.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Raw ownership map, in index order.
    #[must_use]
    pub fn owners(&self) -> &[Option<PlayerId>] {
        &self.owners
    }

    /// Iterate over `(index, state, owner)` for every cell.
    pub fn iter(&self) -> impl Iterator<Item = (usize, CellState, Option<PlayerId>)> + '_ {
        self.cells
            .iter()
            .zip(&self.owners)
            .enumerate()
            .map(|(idx, (&state, &owner))| (idx, state, owner))
    }

    /// Iterate over blocks as `(states, owners)` slice pairs.
    pub fn blocks(
        &self,
    ) -> impl Iterator<Item = (&[CellState], &[Option<PlayerId>])> + '_ {
        self.cells
            .chunks_exact(BLOCK_SIZE)
            .zip(self.owners.chunks_exact(BLOCK_SIZE))
    }

    /// Count cells in each state.
    #[must_use]
    pub fn state_counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for &state in &self.cells {
            counts.bump(state);
        }
        counts
    }

    /// Count cells owned by a player.
    #[must_use]
    pub fn count_owned(&self, player: PlayerId) -> usize {
        self.owners.iter().filter(|o| **o == Some(player)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::free(8).unwrap();
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.block_count(), 2);
        assert!(grid.owners().iter().all(Option::is_none));
    }

    #[test]
    fn test_grid_rejects_bad_lengths() {
        assert_eq!(Grid::free(0), Err(GameError::EmptyGrid));
        assert_eq!(Grid::free(6), Err(GameError::MisalignedGrid(6)));
    }

    #[test]
    fn test_index_bounds() {
        let grid = Grid::free(8).unwrap();
        assert_eq!(grid.index(0), Some(0));
        assert_eq!(grid.index(7), Some(7));
        assert_eq!(grid.index(8), None);
        assert_eq!(grid.index(-1), None);
        assert!(!grid.index_valid(i64::MIN));
    }

    #[test]
    fn test_set_clears_owner_on_unownable_state() {
        let mut grid = Grid::free(4).unwrap();
        grid.set(1, CellState::Allocated, Some(2));
        assert_eq!(grid.owner(1), Some(2));

        grid.set_state(1, CellState::Fortified);
        assert_eq!(grid.owner(1), Some(2));

        grid.set_state(1, CellState::Free);
        assert_eq!(grid.owner(1), None);

        grid.set(2, CellState::Corrupt, Some(2));
        assert_eq!(grid.owner(2), None);
    }

    #[test]
    fn test_corrupt_spares_fortified_and_system() {
        let mut grid = Grid::new(vec![
            CellState::Fortified,
            CellState::System,
            CellState::Allocated,
            CellState::Free,
        ])
        .unwrap();
        assert!(!grid.corrupt(0));
        assert!(!grid.corrupt(1));
        assert!(grid.corrupt(2));
        assert!(grid.corrupt(3));
        assert_eq!(grid.state(0), Some(CellState::Fortified));
        assert_eq!(grid.state(2), Some(CellState::Corrupt));
    }

    #[test]
    fn test_block_helpers() {
        assert_eq!(block_of(5), 1);
        assert_eq!(block_start(7), 4);
        assert_eq!(block_start(4), 4);
        assert_eq!(block_start(3), 0);
    }

    #[test]
    fn test_state_counts() {
        let grid = Grid::new(vec![
            CellState::Free,
            CellState::Free,
            CellState::System,
            CellState::Corrupt,
        ])
        .unwrap();
        let counts = grid.state_counts();
        assert_eq!(counts.free, 2);
        assert_eq!(counts.system, 1);
        assert_eq!(counts.corrupt, 1);
        assert_eq!(counts.get(CellState::Allocated), 0);
    }
}

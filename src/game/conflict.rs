//! Contention detection between simultaneous mutating commands.
//!
//! Two players racing for the same cell in one round do not get an arbitrary
//! winner: the cell itself is penalized. Detection runs on the batch exactly
//! as submitted, before dedup or validation, so a command that will later be
//! dropped or voided still contends for every real cell it names.

use std::collections::{HashMap, HashSet};

use crate::game::{Command, Grid};

/// Cells named by more than one mutating command in a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContestedCells {
    cells: HashSet<usize>,
}

impl ContestedCells {
    /// Detect contested cells in a batch.
    ///
    /// Out-of-range indices are ignored. A command naming the same cell more
    /// than once counts once for that cell.
    #[must_use]
    pub fn detect(grid: &Grid, commands: &[Command]) -> Self {
        let mut refs: HashMap<usize, u32> = HashMap::new();
        let mut seen = HashSet::new();

        for command in commands.iter().filter(|c| c.is_mutating()) {
            seen.clear();
            for &cell in command.kind.declared_cells() {
                if let Some(index) = grid.index(cell)
                    && seen.insert(index)
                {
                    *refs.entry(index).or_insert(0) += 1;
                }
            }
        }

        let cells = refs
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(index, _)| index)
            .collect();
        Self { cells }
    }

    /// Check if a cell is contested.
    #[must_use]
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    /// Number of contested cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell is contested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Contested cells in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<usize> {
        let mut cells: Vec<_> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::free(8).unwrap()
    }

    #[test]
    fn test_no_contention_for_disjoint_commands() {
        let commands = vec![Command::allocate(0, [0, 1]), Command::allocate(1, [4, 5])];
        assert!(ContestedCells::detect(&grid(), &commands).is_empty());
    }

    #[test]
    fn test_shared_cell_is_contested() {
        let commands = vec![Command::allocate(0, [0, 1]), Command::free(1, [1])];
        let contested = ContestedCells::detect(&grid(), &commands);
        assert_eq!(contested.sorted(), vec![1]);
    }

    #[test]
    fn test_observing_commands_do_not_contend() {
        let commands = vec![
            Command::allocate(0, [2]),
            Command::scan(1, 2),
            Command::stats(2),
        ];
        assert!(ContestedCells::detect(&grid(), &commands).is_empty());
    }

    #[test]
    fn test_invalid_commands_still_contend() {
        // Cross-block allocate is void, but still names cell 3.
        let commands = vec![Command::allocate(0, [3, 4]), Command::fortify(1, [3])];
        let contested = ContestedCells::detect(&grid(), &commands);
        assert!(contested.contains(3));
        assert!(!contested.contains(4));
    }

    #[test]
    fn test_out_of_range_ignored() {
        let commands = vec![Command::free(0, [-1, 99]), Command::free(1, [-1, 99])];
        assert!(ContestedCells::detect(&grid(), &commands).is_empty());
    }

    #[test]
    fn test_repeat_within_one_command_counts_once() {
        let commands = vec![Command::fortify(0, [2, 2, 2])];
        assert!(ContestedCells::detect(&grid(), &commands).is_empty());
    }

    #[test]
    fn test_same_player_twice_contends() {
        let commands = vec![Command::allocate(0, [0]), Command::free(0, [0])];
        assert!(ContestedCells::detect(&grid(), &commands).contains(0));
    }
}

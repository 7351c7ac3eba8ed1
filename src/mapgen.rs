//! Deterministic initial grid generation.

// Grid generation uses intentional casts for RNG operations
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

use crate::game::{CellState, BLOCK_SIZE};

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random f64 in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Proportions of non-free cells in a generated grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridGenConfig {
    /// Probability that a cell is `SYSTEM`.
    pub system_ratio: f64,
    /// Probability that a non-system cell starts `CORRUPT`.
    pub corrupt_ratio: f64,
}

impl Default for GridGenConfig {
    fn default() -> Self {
        Self {
            system_ratio: 0.10,
            corrupt_ratio: 0.05,
        }
    }
}

/// Error type for grid generation.
#[derive(Debug, Clone)]
pub struct GridGenError {
    /// Description of the error.
    pub reason: String,
}

impl std::fmt::Display for GridGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Grid generation error: {}", self.reason)
    }
}

impl std::error::Error for GridGenError {}

/// Generate an initial grid.
///
/// The same `seed`, `cells` and `config` always produce the same grid.
///
/// # Errors
///
/// Returns an error if `cells` is not a positive multiple of the block size
/// or a ratio lies outside `[0, 1]`.
pub fn generate_grid(
    seed: u64,
    cells: usize,
    config: &GridGenConfig,
) -> Result<Vec<CellState>, GridGenError> {
    if cells == 0 || cells % BLOCK_SIZE != 0 {
        return Err(GridGenError {
            reason: format!("cell count {cells} must be a positive multiple of {BLOCK_SIZE}"),
        });
    }
    for (name, ratio) in [
        ("system_ratio", config.system_ratio),
        ("corrupt_ratio", config.corrupt_ratio),
    ] {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(GridGenError {
                reason: format!("{name} {ratio} outside [0, 1]"),
            });
        }
    }

    let mut rng = Rng::new(seed);
    let grid = (0..cells)
        .map(|_| {
            if rng.next_f64() < config.system_ratio {
                CellState::System
            } else if rng.next_f64() < config.corrupt_ratio {
                CellState::Corrupt
            } else {
                CellState::Free
            }
        })
        .collect();

    Ok(grid)
}

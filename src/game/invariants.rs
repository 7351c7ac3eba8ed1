//! Game invariants - sanity checks that detect bugs.
//!
//! No sequence of player commands should ever violate these. A violation
//! means a transition forgot to maintain the ownership map.

use crate::game::{Game, BLOCK_SIZE};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// An unstarted game has nothing to check.
#[must_use]
pub fn check_invariants(game: &Game) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let Some(grid) = game.grid() else {
        return violations;
    };

    if grid.len() % BLOCK_SIZE != 0 {
        violations.push(InvariantViolation {
            message: format!("Grid length {} is not a multiple of {BLOCK_SIZE}", grid.len()),
        });
    }

    if grid.owners().len() != grid.cells().len() {
        violations.push(InvariantViolation {
            message: format!(
                "Ownership map has {} entries for {} cells",
                grid.owners().len(),
                grid.cells().len()
            ),
        });
    }

    for (index, state, owner) in grid.iter() {
        let Some(owner) = owner else {
            continue;
        };
        if !state.is_ownable() {
            violations.push(InvariantViolation {
                message: format!("Cell {index} in state {state:?} has owner {owner}"),
            });
        }
        if !game.is_registered(owner) {
            violations.push(InvariantViolation {
                message: format!("Cell {index} owned by unregistered player {owner}"),
            });
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(game: &Game) {
    let violations = check_invariants(game);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_game: &Game) {}

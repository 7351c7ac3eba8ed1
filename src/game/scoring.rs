//! Block-based scoring.
//!
//! Scores are never stored: every query walks the grid once.

use serde::{Deserialize, Serialize};

use crate::game::{CellState, Grid, Player, PlayerId, BLOCK_SIZE};

/// Bonus awarded for owning every cell of a block.
pub const BLOCK_BONUS: u32 = 4;

/// Derived score for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Player the score belongs to.
    pub player: PlayerId,
    /// Player name, copied for reporting.
    pub name: String,
    /// Cells owned (allocated or fortified).
    pub owned_cells: u32,
    /// Owned cells that are fortified.
    pub fortified_cells: u32,
    /// Blocks whose every cell this player owns.
    pub owned_blocks: u32,
    /// Cell points plus block bonuses.
    pub total_score: u32,
}

impl PlayerScore {
    /// All-zero score for a player holding nothing.
    pub(crate) fn zero(player: &Player) -> Self {
        Self {
            player: player.id,
            name: player.name.clone(),
            owned_cells: 0,
            fortified_cells: 0,
            owned_blocks: 0,
            total_score: 0,
        }
    }
}

/// Compute scores for every registered player, in registration order.
///
/// Owners absent from `players` are ignored.
#[must_use]
pub fn compute_scores(grid: &Grid, players: &[Player]) -> Vec<PlayerScore> {
    let mut scores: Vec<PlayerScore> = players.iter().map(PlayerScore::zero).collect();
    let slot = |id: PlayerId| players.iter().position(|p| p.id == id);

    for (states, owners) in grid.blocks() {
        for (&state, &owner) in states.iter().zip(owners) {
            let Some(idx) = owner.and_then(slot) else {
                continue;
            };
            let score = &mut scores[idx];
            score.owned_cells += 1;
            if state.is_ownable() {
                score.total_score += 1;
            }
            if state == CellState::Fortified {
                score.fortified_cells += 1;
            }
        }

        if let Some(owner) = sole_owner(owners)
            && let Some(idx) = slot(owner)
        {
            scores[idx].owned_blocks += 1;
            scores[idx].total_score += BLOCK_BONUS;
        }
    }

    scores
}

/// The common owner of a block, if every cell has the same one.
fn sole_owner(owners: &[Option<PlayerId>]) -> Option<PlayerId> {
    debug_assert_eq!(owners.len(), BLOCK_SIZE);
    let first = owners.first().copied().flatten()?;
    owners.iter().all(|&o| o == Some(first)).then_some(first)
}

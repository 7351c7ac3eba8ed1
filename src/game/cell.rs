//! Cell states, stored and observed.

use serde::{Deserialize, Serialize};

/// State of a single stored grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CellState {
    /// Unused cell, available for allocation.
    Free = 0,
    /// Cell held by a player.
    Allocated = 1,
    /// Damaged cell; can be recovered or freed.
    Corrupt = 2,
    /// Allocated cell hardened against contention and swaps.
    Fortified = 3,
    /// Reserved cell; no player command can change it.
    System = 4,
}

impl CellState {
    /// All stored states, in declaration order.
    pub const ALL: [CellState; 5] = [
        CellState::Free,
        CellState::Allocated,
        CellState::Corrupt,
        CellState::Fortified,
        CellState::System,
    ];

    /// Check if a cell in this state may carry an owner.
    #[must_use]
    pub const fn is_ownable(self) -> bool {
        matches!(self, CellState::Allocated | CellState::Fortified)
    }

    /// Check if contention can corrupt a cell in this state.
    #[must_use]
    pub const fn is_corruptible(self) -> bool {
        !matches!(self, CellState::Fortified | CellState::System)
    }

    /// Check if a cell in this state may take part in a swap.
    #[must_use]
    pub const fn is_swappable(self) -> bool {
        !matches!(self, CellState::Fortified | CellState::System)
    }

    /// Single-character glyph used by the text renderer.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Allocated => 'A',
            CellState::Corrupt => 'X',
            CellState::Fortified => 'F',
            CellState::System => '#',
        }
    }
}

/// State of a cell as reported to a scanning player.
///
/// The `Owned*` variants only ever appear in scan responses, and only for
/// cells the scanning player owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObservedState {
    /// See [`CellState::Free`].
    Free,
    /// Allocated by someone other than the observer.
    Allocated,
    /// See [`CellState::Corrupt`].
    Corrupt,
    /// Fortified by someone other than the observer.
    Fortified,
    /// See [`CellState::System`].
    System,
    /// Allocated by the observer.
    OwnedAllocated,
    /// Fortified by the observer.
    OwnedFortified,
}

impl ObservedState {
    /// Project a stored state for an observer.
    #[must_use]
    pub const fn observe(state: CellState, owned_by_observer: bool) -> Self {
        match (state, owned_by_observer) {
            (CellState::Allocated, true) => ObservedState::OwnedAllocated,
            (CellState::Fortified, true) => ObservedState::OwnedFortified,
            (CellState::Allocated, false) => ObservedState::Allocated,
            (CellState::Fortified, false) => ObservedState::Fortified,
            (CellState::Free, _) => ObservedState::Free,
            (CellState::Corrupt, _) => ObservedState::Corrupt,
            (CellState::System, _) => ObservedState::System,
        }
    }
}

impl From<CellState> for ObservedState {
    fn from(state: CellState) -> Self {
        Self::observe(state, false)
    }
}

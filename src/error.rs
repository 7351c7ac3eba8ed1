//! Error types for host-facing game operations.
//!
//! Player input never produces an error. These cover misuse by the host
//! (bad initial grid, resolving before start) only.

use std::fmt;

/// Errors returned by [`Game`](crate::game::Game) lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The initial grid has no cells.
    EmptyGrid,
    /// The initial grid length is not a whole number of blocks.
    MisalignedGrid(usize),
    /// `start_game` was called on a game that is already running.
    AlreadyStarted,
    /// A round was requested before `start_game`.
    NotStarted,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyGrid => write!(f, "initial grid is empty"),
            GameError::MisalignedGrid(len) => write!(
                f,
                "grid length {len} is not a multiple of the block size {}",
                crate::game::BLOCK_SIZE
            ),
            GameError::AlreadyStarted => write!(f, "game has already been started"),
            GameError::NotStarted => write!(f, "game has not been started"),
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for game lifecycle operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misaligned_display_mentions_length() {
        let msg = GameError::MisalignedGrid(6).to_string();
        assert!(msg.contains('6'));
        assert!(msg.contains('4'));
    }
}

//! Player identities.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player: its zero-based registration index.
pub type PlayerId = u32;

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Registration-order identifier.
    pub id: PlayerId,
    /// Display name, assumed unique by the host.
    pub name: String,
}

impl Player {
    /// Create a new player.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Get a lightweight handle to this player.
    #[must_use]
    pub const fn handle(&self) -> PlayerHandle {
        PlayerHandle(self.id)
    }
}

/// Handle returned to the host on registration, used to address commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerHandle(pub PlayerId);

impl PlayerHandle {
    /// Get the underlying player id.
    #[must_use]
    pub const fn id(self) -> PlayerId {
        self.0
    }
}

impl From<PlayerHandle> for PlayerId {
    fn from(handle: PlayerHandle) -> Self {
        handle.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new(3, "alice");
        assert_eq!(player.id, 3);
        assert_eq!(player.name, "alice");
        assert_eq!(player.handle().id(), 3);
    }
}

//! Game recordings and deterministic replay.
//!
//! Because round resolution is 100% deterministic, a recording only needs:
//! - the rules, initial grid and round limit
//! - the registered player names, in registration order
//! - the command batch submitted for every round
//!
//! No state deltas are stored. To view round N, re-run rounds 0..N.
//!
//! # Time Travel
//!
//! - **Forward**: resolve the next recorded batch
//! - **Jump to round N**: re-run from round 0 to N

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{CellState, Command, Game, PlayerScore, Response, RuleConfig};

/// Everything needed to reproduce a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Command limits in force.
    #[serde(default)]
    pub rules: RuleConfig,
    /// Advisory round limit.
    pub total_rounds: u32,
    /// Grid passed to `start_game`.
    pub initial_grid: Vec<CellState>,
    /// Player names in registration order; ids are their positions.
    pub players: Vec<String>,
    /// Command batch of each round, in order.
    #[serde(default)]
    pub rounds: Vec<Vec<Command>>,
}

impl Recording {
    /// Create a recording with no rounds yet.
    #[must_use]
    pub fn new(
        rules: RuleConfig,
        total_rounds: u32,
        initial_grid: Vec<CellState>,
        players: Vec<String>,
    ) -> Self {
        Self {
            rules,
            total_rounds,
            initial_grid,
            players,
            rounds: Vec::new(),
        }
    }

    /// Append a round's command batch.
    pub fn push_round(&mut self, commands: Vec<Command>) {
        self.rounds.push(commands);
    }

    /// Number of recorded rounds.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Parse a recording from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a recording.
    pub fn from_json_str(json: &str) -> Result<Self, ReplayError> {
        serde_json::from_str(json).map_err(|e| ReplayError::Parse(e.to_string()))
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ReplayError> {
        serde_json::to_string_pretty(self).map_err(|e| ReplayError::Parse(e.to_string()))
    }

    /// Save recording to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|e| ReplayError::io(path, &e))
    }

    /// Load recording from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail or the format is invalid.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|e| ReplayError::io(path, &e))?;
        Self::from_json_str(&json)
    }

    /// Build a fresh game at round 0 from this recording.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial grid is rejected.
    pub fn start(&self) -> Result<Game, ReplayError> {
        let mut game = Game::with_rules(self.rules);
        for name in &self.players {
            game.register_player(name.clone());
        }
        game.start_game(self.initial_grid.clone(), self.total_rounds)?;
        Ok(game)
    }
}

/// Error type for replay operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// Reading or writing the recording failed.
    Io {
        /// File involved.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },
    /// The recording could not be (de)serialized.
    Parse(String),
    /// The recorded game could not be started.
    Game(GameError),
    /// Round number out of bounds.
    RoundOutOfBounds {
        /// Requested round.
        requested: usize,
        /// Number of recorded rounds.
        recorded: usize,
    },
    /// Every recorded round has been replayed.
    Finished,
}

impl ReplayError {
    fn io(path: &Path, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: error.to_string(),
        }
    }
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => write!(f, "{path}: {reason}"),
            Self::Parse(reason) => write!(f, "invalid recording: {reason}"),
            Self::Game(e) => write!(f, "cannot start recorded game: {e}"),
            Self::RoundOutOfBounds {
                requested,
                recorded,
            } => write!(f, "Round {requested} out of bounds ({recorded} recorded)"),
            Self::Finished => write!(f, "All recorded rounds have been replayed"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<GameError> for ReplayError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}

/// Steps through a recording, keeping every round's responses.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    recording: Recording,
    game: Game,
    responses: Vec<Vec<Response>>,
}

impl ReplayEngine {
    /// Create an engine positioned before the first round.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded game cannot be started.
    pub fn new(recording: Recording) -> Result<Self, ReplayError> {
        let game = recording.start()?;
        Ok(Self {
            recording,
            game,
            responses: Vec::new(),
        })
    }

    /// The recording being replayed.
    #[must_use]
    pub const fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Game state after the rounds replayed so far.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Number of rounds replayed so far.
    #[must_use]
    pub fn round(&self) -> usize {
        self.responses.len()
    }

    /// Check if every recorded round has been replayed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.round() >= self.recording.round_count()
    }

    /// Responses of an already replayed round.
    #[must_use]
    pub fn responses(&self, round: usize) -> Option<&[Response]> {
        self.responses.get(round).map(Vec::as_slice)
    }

    /// Current scores.
    #[must_use]
    pub fn scores(&self) -> Vec<PlayerScore> {
        self.game.get_scores()
    }

    /// Replay the next recorded round and return its responses.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Finished`] once every round has been replayed.
    pub fn step_forward(&mut self) -> Result<&[Response], ReplayError> {
        self.step(true)
    }

    /// Replay the next recorded round without the debug invariant assertion.
    ///
    /// Used by tooling that checks invariants itself and reports violations
    /// instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Finished`] once every round has been replayed.
    pub fn step_forward_unchecked(&mut self) -> Result<&[Response], ReplayError> {
        self.step(false)
    }

    fn step(&mut self, checked: bool) -> Result<&[Response], ReplayError> {
        let round = self.round();
        let Some(commands) = self.recording.rounds.get(round) else {
            return Err(ReplayError::Finished);
        };
        let responses = if checked {
            self.game.resolve_round(commands)?
        } else {
            self.game.resolve_round_unchecked(commands)?
        };
        self.responses.push(responses);
        Ok(&self.responses[round])
    }

    /// Replay every remaining round.
    ///
    /// # Errors
    ///
    /// Returns an error if a round cannot be resolved.
    pub fn run_to_end(&mut self) -> Result<(), ReplayError> {
        while !self.is_finished() {
            self.step_forward()?;
        }
        Ok(())
    }

    /// Jump to the state after `round` rounds, re-running from the start.
    ///
    /// # Errors
    ///
    /// Returns an error if `round` exceeds the recorded rounds.
    pub fn seek(&mut self, round: usize) -> Result<(), ReplayError> {
        let recorded = self.recording.round_count();
        if round > recorded {
            return Err(ReplayError::RoundOutOfBounds {
                requested: round,
                recorded,
            });
        }

        self.game = self.recording.start()?;
        self.responses.clear();
        while self.round() < round {
            self.step_forward()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Recording {
        let mut recording = Recording::new(
            RuleConfig::default(),
            5,
            vec![CellState::Free; 8],
            vec!["alice".to_string(), "bob".to_string()],
        );
        recording.push_round(vec![Command::allocate(0, [0, 1])]);
        recording.push_round(vec![Command::allocate(1, [0]), Command::stats(0)]);
        recording
    }

    #[test]
    fn test_step_forward_to_end() {
        let mut engine = ReplayEngine::new(sample()).unwrap();
        assert_eq!(engine.step_forward().unwrap()[0].success_cells(), Some(&[0, 1][..]));
        assert_eq!(engine.step_forward().unwrap().len(), 2);
        assert!(engine.is_finished());
        assert_eq!(engine.step_forward(), Err(ReplayError::Finished));
        assert_eq!(engine.game().grid().unwrap().state(0), Some(CellState::Corrupt));
    }

    #[test]
    fn test_unchecked_steps_match_checked() {
        let mut checked = ReplayEngine::new(sample()).unwrap();
        let mut unchecked = ReplayEngine::new(sample()).unwrap();
        while !checked.is_finished() {
            let expected = checked.step_forward().unwrap().to_vec();
            assert_eq!(unchecked.step_forward_unchecked().unwrap(), &expected[..]);
        }
        assert!(unchecked.is_finished());
        assert_eq!(unchecked.step_forward_unchecked(), Err(ReplayError::Finished));
        assert_eq!(unchecked.scores(), checked.scores());
    }

    #[test]
    fn test_seek_backwards_rebuilds_state() {
        let mut engine = ReplayEngine::new(sample()).unwrap();
        engine.run_to_end().unwrap();
        engine.seek(1).unwrap();
        assert_eq!(engine.round(), 1);
        assert_eq!(engine.game().round(), 1);
        let grid = engine.game().grid().unwrap();
        assert_eq!(grid.state(0), Some(CellState::Allocated));
        assert_eq!(grid.owner(0), Some(0));
    }

    #[test]
    fn test_seek_out_of_bounds() {
        let mut engine = ReplayEngine::new(sample()).unwrap();
        assert_eq!(
            engine.seek(3),
            Err(ReplayError::RoundOutOfBounds {
                requested: 3,
                recorded: 2
            })
        );
    }

    #[test]
    fn test_bad_initial_grid() {
        let recording = Recording::new(RuleConfig::default(), 1, vec![CellState::Free; 3], vec![]);
        assert_eq!(
            ReplayEngine::new(recording).unwrap_err(),
            ReplayError::Game(GameError::MisalignedGrid(3))
        );
    }

    #[test]
    fn test_parse_minimal_json() {
        let json = r#"{
            "total_rounds": 3,
            "initial_grid": ["FREE", "FREE", "SYSTEM", "FREE"],
            "players": ["alice"],
            "rounds": [[{"player": 0, "type": "scan", "cell": 2}]]
        }"#;
        let recording = Recording::from_json_str(json).unwrap();
        assert_eq!(recording.rules, RuleConfig::default());
        assert_eq!(recording.rounds[0][0], Command::scan(0, 2));
    }
}

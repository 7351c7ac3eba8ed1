//! Game state and round orchestration.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::{GameError, GameResult};
use crate::game::{
    assert_invariants, compute_scores, execute, CellState, Command, ContestedCells, Grid,
    Player, PlayerHandle, PlayerId, PlayerScore, Response, RoundContext, RuleConfig,
};

/// Grid and round counters of a started game.
#[derive(Debug, Clone)]
pub struct Board {
    /// The live grid.
    pub grid: Grid,
    /// Rounds resolved so far (0-indexed counter of the next round).
    pub round: u32,
    /// Advisory round limit reported by `Stats`.
    pub total_rounds: u32,
}

/// Complete game state: registered players plus the board once started.
#[derive(Debug, Clone, Default)]
pub struct Game {
    /// Registered players, in registration order.
    pub players: Vec<Player>,
    /// Command limits.
    pub rules: RuleConfig,
    board: Option<Board>,
}

impl Game {
    /// Create an empty game with default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty game with the given rules.
    #[must_use]
    pub fn with_rules(rules: RuleConfig) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Register a new player. Names are assumed unique.
    pub fn register_player(&mut self, name: impl Into<String>) -> PlayerHandle {
        let id = PlayerId::try_from(self.players.len()).unwrap_or(PlayerId::MAX);
        let player = Player::new(id, name);
        let handle = player.handle();
        self.players.push(player);
        handle
    }

    /// Start the game on an initial grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the game was already started or the grid is empty
    /// or not a whole number of blocks.
    pub fn start_game(&mut self, initial: Vec<CellState>, total_rounds: u32) -> GameResult<()> {
        if self.board.is_some() {
            return Err(GameError::AlreadyStarted);
        }
        let grid = Grid::new(initial)?;
        debug!(cells = grid.len(), total_rounds, "game started");
        self.board = Some(Board {
            grid,
            round: 0,
            total_rounds,
        });
        Ok(())
    }

    /// Check if `start_game` has succeeded.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.board.is_some()
    }

    /// Get the board of a started game.
    #[must_use]
    pub const fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Get the grid of a started game.
    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.board.as_ref().map(|b| &b.grid)
    }

    /// Rounds resolved so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.board.as_ref().map_or(0, |b| b.round)
    }

    /// Get a player by ID.
    #[must_use]
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Check if a player ID is registered.
    #[must_use]
    pub fn is_registered(&self, id: PlayerId) -> bool {
        self.get_player(id).is_some()
    }

    /// Resolve one round of commands.
    ///
    /// Contention is detected on the raw batch. Mutating commands run before
    /// observing commands, and each registered player gets at most one
    /// command honored: their first mutating command if any, otherwise their
    /// first observing command. The round counter advances by one regardless
    /// of the batch.
    ///
    /// In debug builds the game invariants are asserted after the round.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotStarted`] if called before `start_game`.
    pub fn resolve_round(&mut self, commands: &[Command]) -> GameResult<Vec<Response>> {
        let responses = self.resolve_round_unchecked(commands)?;
        assert_invariants(self);
        Ok(responses)
    }

    /// Resolve one round like [`Game::resolve_round`], without the debug
    /// invariant assertion.
    ///
    /// Callers that report violations themselves run
    /// [`check_invariants`](crate::game::check_invariants) afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotStarted`] if called before `start_game`.
    pub fn resolve_round_unchecked(&mut self, commands: &[Command]) -> GameResult<Vec<Response>> {
        let honored = self.honored_commands(commands);
        let Some(board) = self.board.as_mut() else {
            return Err(GameError::NotStarted);
        };

        let contested = ContestedCells::detect(&board.grid, commands);
        let ctx = RoundContext {
            contested: &contested,
            rules: &self.rules,
            rounds_remaining: i64::from(board.total_rounds) - i64::from(board.round),
        };

        let responses: Vec<Response> = honored
            .into_iter()
            .map(|command| execute(&mut board.grid, &ctx, command))
            .collect();

        debug!(
            round = board.round,
            submitted = commands.len(),
            honored = responses.len(),
            contested = contested.len(),
            "round resolved"
        );
        board.round += 1;
        Ok(responses)
    }

    /// Pick the commands to honor, in execution order.
    ///
    /// Mutating commands come first, then observing ones, each in submission
    /// order. A player is honored once across both phases, so a mutation
    /// always wins over an observation from the same player.
    fn honored_commands<'a>(&self, commands: &'a [Command]) -> Vec<&'a Command> {
        let (mutating, observing): (Vec<&Command>, Vec<&Command>) =
            commands.iter().partition(|c| c.is_mutating());

        let mut handled: HashSet<PlayerId> = HashSet::new();
        mutating
            .into_iter()
            .chain(observing)
            .filter(|command| {
                if !self.is_registered(command.player) {
                    trace!(player = command.player, "dropped command from unregistered player");
                    return false;
                }
                if !handled.insert(command.player) {
                    trace!(
                        player = command.player,
                        kind = command.kind.name(),
                        "dropped repeat command"
                    );
                    return false;
                }
                true
            })
            .collect()
    }

    /// Current scores for every registered player.
    ///
    /// Before the game starts every player scores zero.
    #[must_use]
    pub fn get_scores(&self) -> Vec<PlayerScore> {
        match &self.board {
            Some(board) => compute_scores(&board.grid, &self.players),
            None => self.players.iter().map(PlayerScore::zero).collect(),
        }
    }

    /// Human-readable dump of every cell's state and owner.
    #[must_use]
    pub fn visualize(&self) -> String {
        crate::render::render_grid(self)
    }
}

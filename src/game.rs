//! The game engine: board state, turn alternation and notifications.
//!
//! [`Game::select_position`] is the only way to change state. Each
//! successful move fires a board notification and then exactly one of a
//! game-ended or player-changed notification.

use crate::board::Board;
use crate::error::EngineError;
use crate::events::{
    self, Channel, GameEnd, Listener, Notifier, PlayerTurn, Subscription,
};
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::rng::{GameRng, choose_first_player};
use crate::rules;
use crate::types::{Cell, Markers, PlayerId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player completed a line.
    Winner(PlayerId),
    /// Board filled with no line completed.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// What a successful move led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// Game continues; the given player moves next.
    Continue(PlayerId),
    /// Game ended with this outcome.
    Finished(Outcome),
}

/// Serializable view of an engine at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot<M> {
    /// Side length.
    pub size: usize,
    /// Board rendered as markers.
    pub board: Vec<Option<M>>,
    /// Player to move (or who made the final move).
    pub current_player: PlayerId,
    /// Successful moves so far.
    pub moves_played: usize,
    /// True once the game is over.
    pub ended: bool,
    /// Winning player, if any.
    pub winner: Option<PlayerId>,
    /// Winning player's marker, if any.
    pub winner_marker: Option<M>,
}

/// N×N tic-tac-toe engine.
///
/// Markers are opaque caller values (strings, icons, anything `Clone`)
/// handed back in rendered boards and notifications.
pub struct Game<M> {
    board: Board,
    markers: Markers<M>,
    current_player: PlayerId,
    moves_played: usize,
    ended: bool,
    winner: Option<PlayerId>,
    notifier: Notifier<M>,
}

impl<M: Clone + 'static> Game<M> {
    /// Creates a game whose first player is drawn from the thread RNG.
    ///
    /// `size` is taken as given; restricting it to a range is up to the caller.
    #[instrument(skip(zero, one))]
    pub fn new(zero: M, one: M, size: usize) -> Self {
        Self::with_rng(zero, one, size, &mut rand::thread_rng())
    }

    /// Creates a game whose first player is drawn from `rng`.
    #[instrument(skip(zero, one, rng))]
    pub fn with_rng<R: Rng + ?Sized>(zero: M, one: M, size: usize, rng: &mut R) -> Self {
        Self::with_first_player(zero, one, size, choose_first_player(rng))
    }

    /// Creates a game whose first player is drawn from a seeded generator.
    #[instrument(skip(zero, one))]
    pub fn seeded(zero: M, one: M, size: usize, seed: u64) -> Self {
        Self::with_first_player(zero, one, size, GameRng::new(seed).first_player())
    }

    /// Creates a game with a fixed first player.
    #[instrument(skip(zero, one))]
    pub fn with_first_player(zero: M, one: M, size: usize, first: PlayerId) -> Self {
        info!(size, %first, "New game");
        Self {
            board: Board::new(size),
            markers: Markers::new(zero, one),
            current_player: first,
            moves_played: 0,
            ended: false,
            winner: None,
            notifier: Notifier::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Board as markers, `None` for empty cells.
    pub fn board(&self) -> Vec<Option<M>> {
        self.board.render(&self.markers)
    }

    /// Raw board model.
    pub fn cells(&self) -> &Board {
        &self.board
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Player to move. After the game ends this is the player who moved last.
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Marker of the player to move.
    pub fn current_marker(&self) -> &M {
        self.markers.get(self.current_player)
    }

    /// Marker mapped to `player`.
    pub fn marker_of(&self, player: PlayerId) -> &M {
        self.markers.get(player)
    }

    /// True once a line was completed or the board filled.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Winning player; `None` while running and after a draw.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Winning player's marker.
    pub fn winner_marker(&self) -> Option<&M> {
        self.winner.map(|player| self.markers.get(player))
    }

    /// Successful moves so far.
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Outcome once ended, `None` while the game runs.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.ended {
            return None;
        }
        Some(self.winner.map_or(Outcome::Draw, Outcome::Winner))
    }

    /// State of the cell at `index`.
    pub fn cell(&self, index: i64) -> Result<Cell, EngineError> {
        let index = self.board.check_index(index)?;
        Ok(self.board.cells()[index])
    }

    /// Indexes of empty cells still playable; none once the game has ended.
    pub fn available_positions(&self) -> Vec<usize> {
        if self.ended {
            return Vec::new();
        }
        self.board
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Linear index of `(row, col)`.
    pub fn index_of(&self, row: i64, col: i64) -> Result<usize, EngineError> {
        self.board.index_of(row, col)
    }

    /// Row containing `index`.
    pub fn row_of(&self, index: i64) -> Result<usize, EngineError> {
        self.board.row_of(index)
    }

    /// Column containing `index`.
    pub fn col_of(&self, index: i64) -> Result<usize, EngineError> {
        self.board.col_of(index)
    }

    /// Captures the current state.
    pub fn snapshot(&self) -> GameSnapshot<M> {
        GameSnapshot {
            size: self.size(),
            board: self.board(),
            current_player: self.current_player,
            moves_played: self.moves_played,
            ended: self.ended,
            winner: self.winner,
            winner_marker: self.winner_marker().cloned(),
        }
    }

    fn player_turn(&self) -> PlayerTurn<M> {
        PlayerTurn {
            player: self.current_player,
            marker: self.current_marker().clone(),
        }
    }

    fn game_end(&self) -> GameEnd<M> {
        GameEnd {
            ended: self.ended,
            winner: self.winner,
            marker: self.winner_marker().cloned(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Plays the current player's mark at `index`.
    ///
    /// # Errors
    ///
    /// Checked in this order, before anything is changed:
    /// - `OutOfRange` if `index` is negative or `>= size²`
    /// - `GameAlreadyEnded` if the game is over
    /// - `PositionAlreadyPlayed` if the cell is taken
    #[instrument(skip(self), fields(player = %self.current_player, moves = self.moves_played))]
    pub fn select_position(&mut self, index: i64) -> Result<Transition, EngineError> {
        let index = self
            .board
            .check_index(index)
            .inspect_err(|e| warn!(error = %e, "Move rejected"))?;
        if self.ended {
            warn!("Move rejected, game already ended");
            return Err(EngineError::GameAlreadyEnded);
        }
        if !self.board.cells()[index].is_empty() {
            warn!(index, "Move rejected, position taken");
            return Err(EngineError::PositionAlreadyPlayed { index });
        }

        let player = self.current_player;
        self.moves_played += 1;
        self.board.place(index, player);
        debug!(index, %player, "Mark placed");
        self.notifier.board_changed(&self.board());

        // The line through `index` holds the mark just placed, so an
        // all-equal line is never all-empty here.
        let won = rules::is_winning_move(&self.board, index)?;
        let transition = if won {
            self.winner = Some(player);
            self.ended = true;
            info!(%player, moves = self.moves_played, "Game won");
            self.notifier.game_ended(&self.game_end());
            Transition::Finished(Outcome::Winner(player))
        } else if self.moves_played == self.board.len() {
            self.ended = true;
            info!(moves = self.moves_played, "Game drawn");
            self.notifier.game_ended(&self.game_end());
            Transition::Finished(Outcome::Draw)
        } else {
            self.current_player = player.opponent();
            debug!(next = %self.current_player, "Turn passed");
            self.notifier.player_changed(&self.player_turn());
            Transition::Continue(self.current_player)
        };

        self.assert_invariants();
        Ok(transition)
    }

    fn assert_invariants(&self) {
        if let Err(violations) = EngineInvariants::check_all(self) {
            for violation in &violations {
                warn!(invariant = %violation.description, "Invariant violated");
            }
            debug_assert!(false, "Engine invariants violated: {violations:?}");
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Subscriptions
    // ─────────────────────────────────────────────────────────────

    /// Listens for board changes. Called at once with the current board.
    pub fn on_board_changed(&self, listener: impl FnMut(&[Option<M>]) + 'static) -> Subscription {
        self.notifier.add_board(Box::new(listener), &self.board())
    }

    /// Listens for turn changes. Called at once with the current player.
    pub fn on_player_changed(&self, listener: impl FnMut(&PlayerTurn<M>) + 'static) -> Subscription {
        self.notifier.add_player(Box::new(listener), &self.player_turn())
    }

    /// Listens for the end of the game. Called at once with the current
    /// ended/winner state.
    pub fn on_game_ended(&self, listener: impl FnMut(&GameEnd<M>) + 'static) -> Subscription {
        self.notifier.add_game_end(Box::new(listener), &self.game_end())
    }

    /// Subscribes `listener` to `channel`.
    ///
    /// # Errors
    ///
    /// `InvalidSubscription` if the listener's payload does not match the channel.
    #[instrument(skip(self, listener))]
    pub fn subscribe(&self, channel: Channel, listener: Listener<M>) -> Result<Subscription, EngineError> {
        events::check_listener(channel, &listener)?;
        Ok(match listener {
            Listener::Board(f) => self.notifier.add_board(f, &self.board()),
            Listener::Player(f) => self.notifier.add_player(f, &self.player_turn()),
            Listener::GameEnd(f) => self.notifier.add_game_end(f, &self.game_end()),
        })
    }

    /// Subscribes by channel name (`onBoardChanged`, `onPlayerChanged`,
    /// `onGameEnded`).
    ///
    /// # Errors
    ///
    /// `InvalidSubscription` for an unknown name or a mismatched listener.
    #[instrument(skip(self, listener))]
    pub fn subscribe_named(&self, name: &str, listener: Listener<M>) -> Result<Subscription, EngineError> {
        let channel = Channel::from_str(name)
            .map_err(|_| EngineError::invalid_subscription(format!("unknown channel {name:?}")))?;
        self.subscribe(channel, listener)
    }

    /// Number of listeners currently on `channel`.
    pub fn listener_count(&self, channel: Channel) -> usize {
        self.notifier.listener_count(channel)
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Game<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("markers", &self.markers)
            .field("current_player", &self.current_player)
            .field("moves_played", &self.moves_played)
            .field("ended", &self.ended)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}

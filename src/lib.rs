//! Tic-tac-toe engine - N×N rules with observable state
//!
//! The engine owns the board, alternates turns, validates moves and detects
//! wins and draws. Front-ends read its state and forward clicks; they learn
//! about changes through three notification channels.
//!
//! # Architecture
//!
//! - **Board**: flat `size²` cell array with index/row/column arithmetic
//! - **Rules**: win detection limited to the lines through the last move
//! - **Game**: turn controller and the single mutating entry point
//! - **Events**: board, player and game-ended channels with replay on subscribe
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Game, PlayerId};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! # fn example() -> Result<(), tictactoe_engine::EngineError> {
//! let mut game = Game::with_first_player("X", "O", 3, PlayerId::Zero);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let handle = game.on_board_changed(move |board| sink.borrow_mut().push(board.to_vec()));
//!
//! game.select_position(4)?;
//! assert_eq!(seen.borrow().last().unwrap()[4], Some("X"));
//!
//! handle.unsubscribe();
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod config;
mod console;
mod error;
mod events;
mod game;
mod invariants;
mod rng;
mod rules;
mod types;

// Crate-level exports - Board model
pub use board::Board;

// Crate-level exports - Engine
pub use game::{Game, GameSnapshot, Outcome, Transition};

// Crate-level exports - Errors
pub use error::{Axis, EngineError};

// Crate-level exports - Notifications
pub use events::{
    BoardListener, Channel, GameEnd, GameEndListener, Listener, PlayerListener, PlayerTurn,
    Subscription, SubscriptionId,
};

// Crate-level exports - Invariants
pub use invariants::{
    AlternatingTurns, EngineInvariants, Invariant, InvariantSet, InvariantViolation,
    MoveCountMatchesBoard, SettledOutcome,
};

// Crate-level exports - Randomness
pub use rng::{GameRng, choose_first_player};

// Crate-level exports - Rules
pub use rules::{is_full, is_winning_move, line_owner};

// Crate-level exports - Core types
pub use types::{Cell, Markers, PlayerId};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Console front-end
pub use console::{Input, parse_input, render_board, run_session};

//! First-class invariants for the engine.
//!
//! Invariants are logical properties that must hold after every move.
//! The engine checks them in debug builds; they are testable on their own.

use crate::game::Game;
use crate::rules;
use crate::types::PlayerId;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the move counter equals the number of occupied cells.
///
/// Cells are never overwritten, so each move adds exactly one mark.
pub struct MoveCountMatchesBoard;

impl<M: Clone + 'static> Invariant<Game<M>> for MoveCountMatchesBoard {
    fn holds(game: &Game<M>) -> bool {
        game.moves_played() == game.cells().occupied()
    }

    fn description() -> &'static str {
        "Moves played equals occupied cells"
    }
}

/// Invariant: players alternate, so their mark counts differ by at most one.
pub struct AlternatingTurns;

impl<M: Clone + 'static> Invariant<Game<M>> for AlternatingTurns {
    fn holds(game: &Game<M>) -> bool {
        let zero = game.cells().count(PlayerId::Zero);
        let one = game.cells().count(PlayerId::One);
        zero.abs_diff(one) <= 1
    }

    fn description() -> &'static str {
        "Players alternate turns"
    }
}

/// Invariant: `ended` and `winner` agree with the board.
///
/// A winner implies ended; ended without a winner implies a full board;
/// a running game never has a full board.
pub struct SettledOutcome;

impl<M: Clone + 'static> Invariant<Game<M>> for SettledOutcome {
    fn holds(game: &Game<M>) -> bool {
        let full = rules::is_full(game.cells());
        match (game.is_ended(), game.winner()) {
            (false, Some(_)) => false,
            (false, None) => !full || game.cells().is_empty(),
            (true, Some(_)) => true,
            (true, None) => full,
        }
    }

    fn description() -> &'static str {
        "Ended flag and winner agree with the board"
    }
}

/// All engine invariants as a composable set.
pub type EngineInvariants = (MoveCountMatchesBoard, AlternatingTurns, SettledOutcome);

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game<char> {
        Game::with_first_player('x', 'o', 3, PlayerId::One)
    }

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(EngineInvariants::check_all(&game()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game = game();
        for index in [4, 0, 8, 2] {
            game.select_position(index).unwrap();
        }
        assert!(EngineInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_draw() {
        let mut game = game();
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.select_position(index).unwrap();
        }
        assert!(game.is_ended());
        assert!(EngineInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (MoveCountMatchesBoard, AlternatingTurns);
        assert!(TwoInvariants::check_all(&game()).is_ok());
    }
}

//! Engine error types.

use derive_more::{Display, Error};

/// Which kind of board coordinate was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Axis {
    /// Linear cell index.
    #[display("index")]
    Index,
    /// Row coordinate.
    #[display("row")]
    Row,
    /// Column coordinate.
    #[display("column")]
    Column,
}

/// Errors reported by the engine.
///
/// Every error is raised before any state is touched, so a failed call
/// leaves the engine exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// An index, row or column falls outside `0..bound`.
    #[display("{axis} {value} is out of range (must be 0..{bound})")]
    OutOfRange {
        /// Coordinate kind.
        axis: Axis,
        /// Offending value.
        value: i64,
        /// Exclusive upper bound.
        bound: usize,
    },

    /// A move was submitted after the game reached a terminal state.
    #[display("Game has already ended")]
    GameAlreadyEnded,

    /// A move was submitted on a cell that is not empty.
    #[display("Position {index} has already been played")]
    PositionAlreadyPlayed {
        /// Cell index that was already occupied.
        index: usize,
    },

    /// A subscription request named an unknown channel or a listener of the
    /// wrong shape for its channel.
    #[display("Invalid subscription: {reason}")]
    InvalidSubscription {
        /// What was wrong with the request.
        reason: String,
    },
}

impl EngineError {
    /// Shorthand for an `OutOfRange` error.
    pub fn out_of_range(axis: Axis, value: i64, bound: usize) -> Self {
        Self::OutOfRange { axis, value, bound }
    }

    /// Shorthand for an `InvalidSubscription` error.
    pub fn invalid_subscription(reason: impl Into<String>) -> Self {
        Self::InvalidSubscription {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = EngineError::out_of_range(Axis::Row, -1, 3);
        assert_eq!(err.to_string(), "row -1 is out of range (must be 0..3)");
    }

    #[test]
    fn test_played_message() {
        let err = EngineError::PositionAlreadyPlayed { index: 4 };
        assert!(err.to_string().contains("already been played"));
    }
}

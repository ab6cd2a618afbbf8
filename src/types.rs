//! Core domain types for the tic-tac-toe engine.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identifier of one of the two players.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum PlayerId {
    /// Player `0`.
    #[display("0")]
    Zero,
    /// Player `1`.
    #[display("1")]
    One,
}

impl PlayerId {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::Zero => PlayerId::One,
            PlayerId::One => PlayerId::Zero,
        }
    }

    /// Numeric identifier (`0` or `1`).
    pub fn index(self) -> usize {
        match self {
            PlayerId::Zero => 0,
            PlayerId::One => 1,
        }
    }

    /// Player for a numeric identifier.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerId::Zero),
            1 => Some(PlayerId::One),
            _ => None,
        }
    }
}

/// State of a single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell claimed by a player.
    Occupied(PlayerId),
}

impl Cell {
    /// Returns the owning player, if any.
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Returns true if nobody has played here.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Fixed mapping from player identifiers to caller-supplied markers.
///
/// Markers are opaque to the engine. They are stored and handed back,
/// never compared or interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Markers<M> {
    zero: M,
    one: M,
}

impl<M> Markers<M> {
    /// Creates the mapping `0 -> zero`, `1 -> one`.
    #[instrument(skip_all)]
    pub fn new(zero: M, one: M) -> Self {
        Self { zero, one }
    }

    /// Marker for the given player.
    pub fn get(&self, player: PlayerId) -> &M {
        match player {
            PlayerId::Zero => &self.zero,
            PlayerId::One => &self.one,
        }
    }

    /// Marker rendered for a cell; `None` for empty cells.
    pub fn render(&self, cell: Cell) -> Option<&M> {
        cell.player().map(|player| self.get(player))
    }
}

impl Default for Markers<String> {
    fn default() -> Self {
        Self::new("X".to_string(), "O".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_toggles() {
        assert_eq!(PlayerId::Zero.opponent(), PlayerId::One);
        assert_eq!(PlayerId::One.opponent(), PlayerId::Zero);
    }

    #[test]
    fn test_index_round_trip() {
        assert_eq!(PlayerId::from_index(PlayerId::One.index()), Some(PlayerId::One));
        assert_eq!(PlayerId::from_index(2), None);
        assert_eq!(PlayerId::Zero.to_string(), "0");
    }

    #[test]
    fn test_markers_render_empty_as_none() {
        let markers = Markers::new('x', 'o');
        assert_eq!(markers.render(Cell::Empty), None);
        assert_eq!(markers.render(Cell::Occupied(PlayerId::One)), Some(&'o'));
    }
}

//! Full-board detection.

use crate::board::Board;
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// A full board with no winning line is a draw.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| !cell.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerId;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new(3)));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(2);
        for (i, p) in [PlayerId::Zero, PlayerId::One, PlayerId::One, PlayerId::Zero]
            .into_iter()
            .enumerate()
        {
            board.place(i, p);
        }
        assert!(is_full(&board));
    }
}

//! Win detection around the most recently played cell.
//!
//! Only the lines that can contain the played cell are inspected: its row,
//! its column, and each diagonal it sits on. That is at most four lines no
//! matter how large the board is.

use crate::board::Board;
use crate::error::EngineError;
use crate::types::{Cell, PlayerId};
use tracing::{instrument, trace};

/// Player owning every cell of `line`, if any.
///
/// An all-empty line is uniform but never a win, so `Empty` is excluded
/// explicitly. Indexes must be valid for `board`.
pub fn line_owner(board: &Board, line: &[usize]) -> Option<PlayerId> {
    let first = board.get(*line.first()?)?;
    let Cell::Occupied(player) = first else {
        return None;
    };
    line.iter()
        .all(|&i| board.get(i) == Some(first))
        .then_some(player)
}

/// Returns true if the mark at `index` completes a full line.
///
/// # Errors
///
/// `OutOfRange` if `index` is not a cell of `board`.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_winning_move(board: &Board, index: usize) -> Result<bool, EngineError> {
    let (row, col) = board.locate(index)?;

    let mut lines = vec![board.row_indexes(row)?, board.col_indexes(col)?];
    if row == col {
        lines.push(board.main_diagonal_indexes());
    }
    if board.flip_row(row)? == col {
        lines.push(board.anti_diagonal_indexes());
    }

    trace!(row, col, candidates = lines.len(), "Checking lines");
    Ok(lines.iter().any(|line| line_owner(board, line).is_some()))
}

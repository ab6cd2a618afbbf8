//! Tests for board indexing through the engine's query surface.

use tictactoe_engine::{Axis, Board, EngineError, Game, PlayerId};

#[test]
fn test_index_row_col_round_trip() {
    for size in 1..=5 {
        let board = Board::new(size);
        for index in 0..(size * size) as i64 {
            let row = board.row_of(index).unwrap();
            let col = board.col_of(index).unwrap();
            assert_eq!(board.index_of(row as i64, col as i64), Ok(index as usize));
        }
    }
}

#[test]
fn test_bounds_are_half_open_everywhere() {
    let board = Board::new(4);
    assert_eq!(board.row_of(16), Err(EngineError::out_of_range(Axis::Index, 16, 16)));
    assert_eq!(board.col_of(-1), Err(EngineError::out_of_range(Axis::Index, -1, 16)));
    assert_eq!(board.index_of(4, 0), Err(EngineError::out_of_range(Axis::Row, 4, 4)));
    assert_eq!(board.index_of(0, 4), Err(EngineError::out_of_range(Axis::Column, 4, 4)));
    assert_eq!(board.index_of(3, 3), Ok(15));
}

#[test]
fn test_lines_through_a_cell() {
    let board = Board::new(4);
    assert_eq!(board.row_indexes(1), Ok(vec![4, 5, 6, 7]));
    assert_eq!(board.col_indexes(2), Ok(vec![2, 6, 10, 14]));
    assert_eq!(board.main_diagonal_indexes(), vec![0, 5, 10, 15]);
    assert_eq!(board.anti_diagonal_indexes(), vec![3, 6, 9, 12]);
    assert_eq!(board.flip_row(1), Ok(2));
}

#[test]
fn test_game_exposes_indexing() {
    let mut game = Game::with_first_player('x', 'o', 3, PlayerId::Zero);
    let index = game.index_of(2, 1).unwrap();
    assert_eq!(index, 7);
    game.select_position(index as i64).unwrap();
    assert_eq!(game.board()[7], Some('x'));
    assert_eq!(game.row_of(7), Ok(2));
    assert_eq!(game.col_of(7), Ok(1));
    assert!(game.cell(9).is_err());
}

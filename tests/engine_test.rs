//! Tests for move submission, turn alternation and terminal states.

use tictactoe_engine::{
    Cell, EngineError, Game, GameRng, Outcome, PlayerId, Transition,
};

fn game(size: usize, first: PlayerId) -> Game<&'static str> {
    Game::with_first_player("X", "O", size, first)
}

fn play(game: &mut Game<&'static str>, moves: &[i64]) {
    for &index in moves {
        game.select_position(index).expect("Valid move");
    }
}

#[test]
fn test_new_game_has_empty_board_of_size_squared() {
    for size in 1..=6 {
        let game = Game::new("X", "O", size);
        assert_eq!(game.board().len(), size * size);
        assert!(game.board().iter().all(Option::is_none));
        assert!(matches!(game.current_player(), PlayerId::Zero | PlayerId::One));
        assert!(!game.is_ended());
        assert_eq!(game.winner(), None);
    }
}

#[test]
fn test_seeded_games_start_with_same_player() {
    for seed in 0..16 {
        let a = Game::seeded("X", "O", 3, seed);
        let b = Game::seeded("X", "O", 3, seed);
        assert_eq!(a.current_player(), b.current_player());
        assert_eq!(a.current_player(), GameRng::new(seed).first_player());
    }
}

#[test]
fn test_move_count_tracks_successful_moves_only() {
    let mut game = game(4, PlayerId::One);
    let moves = [0, 5, 10, 3, 12, 1];
    for (k, &index) in moves.iter().enumerate() {
        game.select_position(index).unwrap();
        assert_eq!(game.moves_played(), k + 1);
    }
    assert!(game.select_position(5).is_err());
    assert!(game.select_position(-3).is_err());
    assert_eq!(game.moves_played(), moves.len());
}

#[test]
fn test_cells_never_overwritten() {
    let mut game = game(3, PlayerId::Zero);
    game.select_position(4).unwrap();
    assert_eq!(
        game.select_position(4),
        Err(EngineError::PositionAlreadyPlayed { index: 4 })
    );
    assert_eq!(game.cell(4), Ok(Cell::Occupied(PlayerId::Zero)));
    assert_eq!(game.current_player(), PlayerId::One);
}

#[test]
fn test_out_of_range_leaves_state_unchanged() {
    let mut game = game(3, PlayerId::Zero);
    game.select_position(0).unwrap();
    let before = game.snapshot();

    for index in [-1, 9, 10, i64::MIN, i64::MAX] {
        assert!(matches!(
            game.select_position(index),
            Err(EngineError::OutOfRange { .. })
        ));
    }
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_played_position_leaves_state_unchanged() {
    let mut game = game(3, PlayerId::Zero);
    play(&mut game, &[0, 1]);
    let before = game.snapshot();
    assert!(matches!(
        game.select_position(1),
        Err(EngineError::PositionAlreadyPlayed { .. })
    ));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_any_move_after_end_rejected() {
    let mut game = game(3, PlayerId::Zero);
    play(&mut game, &[0, 3, 1, 4, 2]);
    let before = game.snapshot();
    for index in 0..9 {
        assert_eq!(game.select_position(index), Err(EngineError::GameAlreadyEnded));
    }
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_top_row_win() {
    for first in [PlayerId::Zero, PlayerId::One] {
        let mut game = game(3, first);
        play(&mut game, &[0, 3, 1, 4]);
        assert_eq!(
            game.select_position(2),
            Ok(Transition::Finished(Outcome::Winner(first)))
        );
        assert!(game.is_ended());
        assert_eq!(game.winner(), Some(first));
        assert_eq!(game.outcome(), Some(Outcome::Winner(first)));
    }
}

#[test]
fn test_full_board_draw() {
    // X O X / X O O / O X X
    let mut game = game(3, PlayerId::Zero);
    play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6]);
    assert!(!game.is_ended());
    assert_eq!(game.select_position(8), Ok(Transition::Finished(Outcome::Draw)));
    assert!(game.is_ended());
    assert_eq!(game.winner(), None);
    assert_eq!(game.winner_marker(), None);
}

#[test]
fn test_diagonal_win() {
    let mut game = game(3, PlayerId::One);
    play(&mut game, &[0, 1, 4, 2]);
    assert_eq!(
        game.select_position(8),
        Ok(Transition::Finished(Outcome::Winner(PlayerId::One)))
    );
}

#[test]
fn test_anti_diagonal_win() {
    let mut game = game(3, PlayerId::Zero);
    play(&mut game, &[2, 0, 4, 1]);
    assert_eq!(
        game.select_position(6),
        Ok(Transition::Finished(Outcome::Winner(PlayerId::Zero)))
    );
    assert_eq!(game.winner_marker(), Some(&"X"));
}

#[test]
fn test_column_win_on_five_by_five() {
    let mut game = game(5, PlayerId::Zero);
    // Player 0 fills column 2, player 1 plays column 0.
    play(&mut game, &[2, 0, 7, 5, 12, 10, 17, 15]);
    assert_eq!(
        game.select_position(22),
        Ok(Transition::Finished(Outcome::Winner(PlayerId::Zero)))
    );
}

#[test]
fn test_win_on_last_cell_is_not_a_draw() {
    // X: 0, 2, 4, 5, 8   O: 1, 3, 6, 7
    let mut game = game(3, PlayerId::Zero);
    play(&mut game, &[0, 1, 2, 3, 4, 6, 5, 7]);
    assert_eq!(
        game.select_position(8),
        Ok(Transition::Finished(Outcome::Winner(PlayerId::Zero)))
    );
}

#[test]
fn test_single_cell_board() {
    let mut game = game(1, PlayerId::One);
    assert_eq!(
        game.select_position(0),
        Ok(Transition::Finished(Outcome::Winner(PlayerId::One)))
    );
}

#[test]
fn test_available_positions() {
    let mut game = game(2, PlayerId::Zero);
    play(&mut game, &[3]);
    assert_eq!(game.available_positions(), vec![0, 1, 2]);
    play(&mut game, &[0, 1]);
    assert!(game.is_ended());
    assert!(game.available_positions().is_empty());
}

#[test]
fn test_snapshot_serializes() {
    let mut game = game(3, PlayerId::Zero);
    play(&mut game, &[4]);
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["moves_played"], 1);
    assert_eq!(json["board"][4], "X");
    assert_eq!(json["board"][0], serde_json::Value::Null);
    assert_eq!(json["current_player"], "One");
}

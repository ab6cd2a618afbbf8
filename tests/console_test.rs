//! Tests for the line-based front-end.

use std::io::Cursor;
use tictactoe_engine::{GameConfig, Outcome, run_session};

fn play(config: &GameConfig, input: &str, json: bool) -> (Option<Outcome>, String) {
    let mut output = Vec::new();
    let outcome = run_session(config, Cursor::new(input.to_string()), &mut output, json).unwrap();
    (outcome, String::from_utf8(output).unwrap())
}

#[test]
fn test_win_by_cell_numbers() {
    let config = GameConfig::default().with_seed(3);
    let (outcome, output) = play(&config, "1\n4\n2\n5\n3\n", false);
    let Some(Outcome::Winner(_)) = outcome else {
        panic!("Expected a winner, got {outcome:?}");
    };
    assert!(output.contains("Winner: "));
    assert!(output.starts_with("1|2|3"));
}

#[test]
fn test_row_col_input_and_errors() {
    let config = GameConfig::default().with_seed(3);
    let (outcome, output) = play(&config, "2 2\n2 2\n0\n9 9\nhello\nq\n", false);
    assert_eq!(outcome, None);
    assert!(output.contains("already been played"));
    assert!(output.contains("not on the board"));
    assert!(output.contains("Enter a cell number"));
}

#[test]
fn test_draw_with_json_summary() {
    let config = GameConfig::default().with_seed(5).with_markers("A", "B");
    let (outcome, output) = play(&config, "1\n2\n3\n5\n4\n6\n8\n7\n9\n", true);
    assert_eq!(outcome, Some(Outcome::Draw));
    assert!(output.contains("Draw!"));
    assert!(output.contains("\"moves_played\": 9"));
}

#[test]
fn test_input_closed_early() {
    let (outcome, _) = play(&GameConfig::default(), "5\n", false);
    assert_eq!(outcome, None);
}

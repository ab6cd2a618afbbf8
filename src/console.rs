//! Line-based hot-seat front-end.
//!
//! A thin view over the engine: it renders whatever the notification
//! channels report and forwards typed moves. It never inspects engine
//! state to decide what to print.

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::events::{GameEnd, PlayerTurn, Subscription};
use crate::game::{Game, Outcome};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::{debug, info, instrument};

/// Formats a rendered board as a grid; empty cells show their 1-based number.
pub fn render_board(board: &[Option<String>], size: usize) -> String {
    let width = board.len().to_string().len();
    let mut result = String::new();
    for row in 0..size {
        for col in 0..size {
            let pos = row * size + col;
            let symbol = match board.get(pos).cloned().flatten() {
                Some(marker) => marker,
                None => (pos + 1).to_string(),
            };
            result.push_str(&format!("{symbol:^width$}"));
            if col + 1 < size {
                result.push('|');
            }
        }
        if row + 1 < size {
            result.push('\n');
            result.push_str(&vec!["-".repeat(width); size].join("+"));
            result.push('\n');
        }
    }
    result
}

/// A move typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Cell number as displayed (1-based).
    Cell(i64),
    /// Row and column (1-based).
    RowCol(i64, i64),
    /// Leave the game.
    Quit,
}

/// Parses one input line; `None` if it is not understood.
pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if matches!(line, "q" | "quit" | "exit") {
        return Some(Input::Quit);
    }
    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();
    match parts.as_slice() {
        [cell] => cell.parse().ok().map(Input::Cell),
        [row, col] => Some(Input::RowCol(row.parse().ok()?, col.parse().ok()?)),
        _ => None,
    }
}

/// Plays one session, reading moves from `input` and writing to `output`.
///
/// Returns the outcome, or `None` if input ran out or the player quit.
#[instrument(skip_all, fields(size = config.size()))]
pub fn run_session<R: BufRead, W: Write>(
    config: &GameConfig,
    input: R,
    mut output: W,
    json: bool,
) -> Result<Option<Outcome>> {
    let size = *config.size();
    let zero = config.marker_zero().clone();
    let one = config.marker_one().clone();
    let mut game = match config.seed() {
        Some(seed) => Game::seeded(zero, one, size, *seed),
        None => Game::new(zero, one, size),
    };

    let pending = Rc::new(RefCell::new(Vec::<String>::new()));
    let subscriptions = subscribe_view(&game, &pending, size);
    flush(&pending, &mut output)?;

    let mut lines = input.lines();
    while !game.is_ended() {
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            debug!("Input closed");
            break;
        };
        let line = line.context("Failed to read move")?;

        let index = match parse_input(&line) {
            Some(Input::Quit) => {
                info!("Player quit");
                break;
            }
            Some(Input::Cell(cell)) => Ok(cell.saturating_sub(1)),
            Some(Input::RowCol(row, col)) => game
                .index_of(row.saturating_sub(1), col.saturating_sub(1))
                .map(|index| index as i64),
            None => {
                writeln!(output, "Enter a cell number or \"row col\"")?;
                continue;
            }
        };

        match index.and_then(|index| game.select_position(index)) {
            Ok(_) => {}
            Err(EngineError::OutOfRange { .. }) => {
                writeln!(output, "That cell is not on the board")?;
            }
            Err(err) => writeln!(output, "{err}")?,
        }
        flush(&pending, &mut output)?;
    }

    for subscription in &subscriptions {
        subscription.unsubscribe();
    }

    if json {
        let snapshot = serde_json::to_string_pretty(&game.snapshot())
            .context("Failed to serialize game")?;
        writeln!(output, "{snapshot}")?;
    }
    Ok(game.outcome())
}

fn subscribe_view(
    game: &Game<String>,
    pending: &Rc<RefCell<Vec<String>>>,
    size: usize,
) -> Vec<Subscription> {
    let board_sink = Rc::clone(pending);
    let turn_sink = Rc::clone(pending);
    let end_sink = Rc::clone(pending);
    vec![
        game.on_board_changed(move |board| {
            board_sink.borrow_mut().push(render_board(board, size));
        }),
        game.on_player_changed(move |turn: &PlayerTurn<String>| {
            turn_sink.borrow_mut().push(format!("Turn: {}", turn.marker));
        }),
        game.on_game_ended(move |end: &GameEnd<String>| {
            if !end.ended {
                return;
            }
            let line = match &end.marker {
                Some(marker) => format!("Winner: {marker}"),
                None => "Draw!".to_string(),
            };
            end_sink.borrow_mut().push(line);
        }),
    ]
}

fn flush<W: Write>(pending: &Rc<RefCell<Vec<String>>>, output: &mut W) -> Result<()> {
    for line in pending.borrow_mut().drain(..) {
        writeln!(output, "{line}")?;
    }
    Ok(())
}

//! Game rules for N×N tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the engine can compose them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{is_winning_move, line_owner};

//! Game rules for ultimate tic-tac-toe.
//!
//! Pure functions over boards and the winner table. The same line check
//! evaluates a sub-board's cells and the meta-board's winner table.

pub mod draw;
pub mod lean;
pub mod win;

pub use draw::{is_draw, is_full, is_meta_draw};
pub use lean::{Lean, lean};
pub use win::{LINES, LineSlot, check_winner};

//! Draw detection for sub-boards and the meta-board.

use super::super::{BoardOutcome, Square, SubBoard};
use super::win::check_winner;
use tracing::instrument;

/// Checks if the sub-board is full (all cells occupied).
#[instrument]
pub fn is_full(board: &SubBoard) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full sub-board with no line is drawn.
#[instrument]
pub fn is_draw(board: &SubBoard) -> bool {
    is_full(board) && check_winner(board.squares()).is_none()
}

/// The meta-board is drawn once every sub-board is resolved with no meta line.
#[instrument]
pub fn is_meta_draw(table: &[BoardOutcome; 9]) -> bool {
    table.iter().all(|o| o.is_resolved()) && check_winner(table).is_none()
}

//! Win detection shared by sub-boards and the meta-board.

use super::super::{BoardOutcome, Player, Position, Square};
use tracing::instrument;

/// The eight tic-tac-toe lines.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A slot that can take part in a three-in-a-row.
///
/// Only slots owned by a player can match. A drawn sub-board is occupied
/// but owned by nobody, so it blocks every line through it.
pub trait LineSlot: Copy + std::fmt::Debug {
    /// The player owning this slot, if any.
    fn owner(self) -> Option<Player>;
}

impl LineSlot for Square {
    fn owner(self) -> Option<Player> {
        match self {
            Square::Occupied(player) => Some(player),
            Square::Empty => None,
        }
    }
}

impl LineSlot for BoardOutcome {
    fn owner(self) -> Option<Player> {
        match self {
            BoardOutcome::Won(player) => Some(player),
            BoardOutcome::Unresolved | BoardOutcome::Draw => None,
        }
    }
}

/// Checks the eight lines of a 3x3 grid.
///
/// Returns `Some(player)` if the player owns all three slots of a line,
/// `None` otherwise.
#[instrument]
pub fn check_winner<S: LineSlot>(slots: &[S; 9]) -> Option<Player> {
    for [a, b, c] in LINES {
        if let Some(player) = slots[a.to_index()].owner()
            && slots[b.to_index()].owner() == Some(player)
            && slots[c.to_index()].owner() == Some(player)
        {
            return Some(player);
        }
    }

    None
}

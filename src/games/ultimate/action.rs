//! First-class action types for ultimate tic-tac-toe.
//!
//! Moves are domain events, not side effects. A rejected move is an
//! ordinary value the view decides how to present.

use super::{Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a player marking a cell of a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The sub-board played in.
    pub board: Position,
    /// The cell marked within the sub-board.
    pub cell: Position,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, board: Position, cell: Position) -> Self {
        Self {
            player,
            board,
            cell,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> board {}, cell {}",
            self.player,
            self.board.label(),
            self.cell.label()
        )
    }
}

/// Why a move was declined. None of these are fatal.
///
/// Variants from `GameOver` to `CellOccupied` are listed in the order the
/// engine checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum IllegalMove {
    /// Play has not started yet (instructions are still showing).
    #[display("The game has not started yet")]
    NotStarted,

    /// A board or cell index outside 0-8.
    #[display("Board {} / cell {} is off the grid", board, cell)]
    OutOfBounds {
        /// Requested sub-board index.
        board: usize,
        /// Requested cell index.
        cell: usize,
    },

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The countdown ran out; the turn is forfeit.
    #[display("Time is up for this turn")]
    TurnExpired,

    /// The move is outside the sub-board the player is sent to.
    #[display("You must play in board {}", _0)]
    WrongBoard(Position),

    /// The sub-board is already won or drawn.
    #[display("Board {} is already decided", _0)]
    BoardResolved(Position),

    /// The cell already holds a mark.
    #[display("Cell {} of board {} is already taken", cell, board)]
    CellOccupied {
        /// Sub-board of the occupied cell.
        board: Position,
        /// The occupied cell.
        cell: Position,
    },
}

impl std::error::Error for IllegalMove {}

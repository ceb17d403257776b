//! Core domain types for ultimate tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player A (goes first).
    A,
    /// Player B (goes second).
    B,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::A => write!(f, "Player A"),
            Player::B => write!(f, "Player B"),
        }
    }
}

/// A cell on a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell marked by a player.
    Occupied(Player),
}

/// One of the nine 3x3 sub-boards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubBoard {
    /// Cells in row-major order (0-8).
    squares: [Square; 9],
}

impl SubBoard {
    /// Creates a new empty sub-board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Marks the cell at the given position.
    ///
    /// Callers are responsible for checking the cell is empty first.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all cells.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Positions of the empty cells.
    #[instrument(skip(self))]
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::iter()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }
}

/// Entry of the sub-board winner table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoardOutcome {
    /// Still playable.
    #[default]
    Unresolved,
    /// Claimed by a player.
    Won(Player),
    /// Filled with no line; blocks play and never counts toward a meta line.
    Draw,
}

impl BoardOutcome {
    /// Returns true once the sub-board is won or drawn.
    pub fn is_resolved(self) -> bool {
        !matches!(self, BoardOutcome::Unresolved)
    }
}

/// Which sub-board the active player may move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Constraint {
    /// Any unresolved sub-board.
    #[default]
    Free,
    /// Only the given sub-board.
    Locked(Position),
}

impl Constraint {
    /// Returns true if a move in `board` satisfies this constraint.
    pub fn permits(self, board: Position) -> bool {
        match self {
            Constraint::Free => true,
            Constraint::Locked(locked) => locked == board,
        }
    }
}

/// Overall status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    #[default]
    InProgress,
    /// A player completed a line of sub-boards.
    Won(Player),
    /// Every sub-board resolved with no meta line.
    Draw,
}

impl GameStatus {
    /// Returns true if no further moves will be accepted.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

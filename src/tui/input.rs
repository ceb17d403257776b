//! Cursor movement for keyboard navigation across all 81 cells.

use crossterm::event::KeyCode;
use strictly_ultimate::Position;

/// A cell on the full 9x9 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
}

impl Cursor {
    /// Starts in the center cell of the center board.
    pub fn new() -> Self {
        Self { row: 4, col: 4 }
    }

    /// The sub-board and cell under the cursor.
    pub fn target(self) -> (Position, Position) {
        let board = Position::from_row_col(self.row / 3, self.col / 3);
        let cell = Position::from_row_col(self.row % 3, self.col % 3);
        match (board, cell) {
            (Some(board), Some(cell)) => (board, cell),
            // Row and column never leave 0-8.
            _ => (Position::Center, Position::Center),
        }
    }

    /// Whether the cursor sits on `(board, cell)`.
    pub fn is_at(self, board: Position, cell: Position) -> bool {
        self.target() == (board, cell)
    }
}

/// Moves cursor based on arrow keys, stopping at the grid edges.
pub fn move_cursor(cursor: Cursor, key: KeyCode) -> Cursor {
    let Cursor { row, col } = cursor;
    match key {
        KeyCode::Right if col < 8 => Cursor { row, col: col + 1 },
        KeyCode::Left if col > 0 => Cursor { row, col: col - 1 },
        KeyCode::Down if row < 8 => Cursor { row: row + 1, col },
        KeyCode::Up if row > 0 => Cursor { row: row - 1, col },
        // No change for other keys or edge cases
        _ => cursor,
    }
}

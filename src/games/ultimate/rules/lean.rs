//! Read-only "likely winner" projection for display.
//!
//! Nothing here feeds back into win detection.

use super::super::{Player, Square, SubBoard};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Which player has more marks on a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lean {
    /// The player has strictly more marks.
    Leaning(Player),
    /// Equal mark counts (including an empty board).
    Even,
}

impl std::fmt::Display for Lean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lean::Leaning(player) => write!(f, "{} likely", player),
            Lean::Even => write!(f, "Even"),
        }
    }
}

/// Compares mark counts on a sub-board.
#[instrument]
pub fn lean(board: &SubBoard) -> Lean {
    let count = |player| {
        board
            .squares()
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    };

    let (a, b) = (count(Player::A), count(Player::B));
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => Lean::Leaning(Player::A),
        std::cmp::Ordering::Less => Lean::Leaning(Player::B),
        std::cmp::Ordering::Equal => Lean::Even,
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::Position;
    use super::*;

    #[test]
    fn test_empty_board_is_even() {
        assert_eq!(lean(&SubBoard::new()), Lean::Even);
    }

    #[test]
    fn test_majority_leans() {
        let mut board = SubBoard::new();
        board.set(Position::TopLeft, Square::Occupied(Player::B));
        board.set(Position::Center, Square::Occupied(Player::B));
        board.set(Position::BottomRight, Square::Occupied(Player::A));
        assert_eq!(lean(&board), Lean::Leaning(Player::B));
        assert_eq!(lean(&board).to_string(), "Player B likely");
    }
}

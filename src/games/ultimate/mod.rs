//! Ultimate tic-tac-toe: nine tic-tac-toe boards arranged as a tenth.

mod action;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod snapshot;
mod types;

pub use action::{IllegalMove, Move};
pub use game::{GameState, MoveResult, UltimateGame};
pub use position::Position;
pub use rules::Lean;
pub use snapshot::{GameSnapshot, MoveOutcome};
pub use types::{BoardOutcome, Constraint, GameStatus, Player, Square, SubBoard};

/// Rules shown before the first turn.
pub fn rules_text(turn_seconds: u64) -> String {
    format!(
        "Welcome to Ultimate Tic Tac Toe!\n\n\
         Rules:\n\
         - Each small board is a regular 3x3 Tic Tac Toe.\n\
         - Win a small board to claim it.\n\
         - Win 3 boards in a row to win the game.\n\
         - You must play in the board matching your opponent's last move.\n\
         - If that board is won or tied, you can play anywhere.\n\
         - You have {turn_seconds} seconds per turn.\n\
         - If you don't move in time, you lose your turn!"
    )
}

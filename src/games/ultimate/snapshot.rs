//! Read-only views of the game handed to the view layer.

use super::rules::{Lean, lean};
use super::types::{BoardOutcome, Constraint, GameStatus, Player, Square, SubBoard};
use super::{Move, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Everything a view needs to redraw the game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// All 81 cells, indexed `[board][cell]`.
    boards: [[Square; 9]; 9],
    /// The sub-board winner table.
    outcomes: [BoardOutcome; 9],
    /// Player whose turn it is (the winner once the game is won).
    to_move: Player,
    /// Where the active player may move.
    constraint: Constraint,
    /// Overall game status.
    status: GameStatus,
    /// False while a forfeited turn's notice is showing.
    moves_allowed: bool,
    /// Mark-count lean per sub-board.
    leans: [Lean; 9],
    /// Number of accepted moves.
    move_count: usize,
}

impl GameSnapshot {
    #[instrument(skip(boards, outcomes))]
    pub(crate) fn capture(
        boards: &[SubBoard; 9],
        outcomes: &[BoardOutcome; 9],
        to_move: Player,
        constraint: Constraint,
        status: GameStatus,
        moves_allowed: bool,
        move_count: usize,
    ) -> Self {
        Self {
            boards: std::array::from_fn(|i| *boards[i].squares()),
            outcomes: *outcomes,
            to_move,
            constraint,
            status,
            moves_allowed,
            leans: std::array::from_fn(|i| lean(&boards[i])),
            move_count,
        }
    }

    /// The mark at `cell` of sub-board `board`.
    pub fn square(&self, board: Position, cell: Position) -> Square {
        self.boards[board.to_index()][cell.to_index()]
    }

    /// Outcome of sub-board `board`.
    pub fn outcome(&self, board: Position) -> BoardOutcome {
        self.outcomes[board.to_index()]
    }

    /// True if the active player may move somewhere in `board` right now.
    pub fn is_playable(&self, board: Position) -> bool {
        !self.status.is_over()
            && self.moves_allowed
            && !self.outcome(board).is_resolved()
            && self.constraint.permits(board)
    }

    /// Sub-boards the active player may move in.
    pub fn playable_boards(&self) -> Vec<Position> {
        Position::iter()
            .filter(|b| self.is_playable(*b))
            .collect()
    }
}

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The move that was applied.
    applied: Move,
    /// The sub-board this move resolved, if any.
    resolved: Option<(Position, BoardOutcome)>,
    /// Constraint for the next turn.
    constraint: Constraint,
    /// Game status after the move.
    status: GameStatus,
}

impl MoveOutcome {
    pub(crate) fn new(
        applied: Move,
        resolved: Option<(Position, BoardOutcome)>,
        constraint: Constraint,
        status: GameStatus,
    ) -> Self {
        Self {
            applied,
            resolved,
            constraint,
            status,
        }
    }

    /// True if this move ended the game.
    pub fn ended_game(&self) -> bool {
        self.status.is_over()
    }
}

//! First-class invariants for ultimate tic-tac-toe.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! The engine checks them in debug builds after every accepted move.

use super::game::GameState;
use super::rules::{check_winner, is_draw};
use super::types::{BoardOutcome, Constraint, Square, SubBoard};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2, I3)>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };

        if !I4::holds(state) {
            violations.push(InvariantViolation::new(I4::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: cells are append-only.
///
/// Replaying the move history onto empty boards, each move must land on an
/// empty cell and the result must equal the current boards.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(state: &GameState) -> bool {
        let mut reconstructed: [SubBoard; 9] = Default::default();

        for mov in state.history() {
            let board = &mut reconstructed[mov.board.to_index()];
            if !board.is_empty(mov.cell) {
                return false;
            }
            board.set(mov.cell, Square::Occupied(mov.player));
        }

        reconstructed == state.boards
    }

    fn description() -> &'static str {
        "Cells are append-only (never overwritten)"
    }
}

/// Invariant: each winner table entry agrees with its sub-board.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameState> for OutcomeConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        state
            .boards
            .iter()
            .zip(state.outcomes.iter())
            .all(|(board, outcome)| match outcome {
                BoardOutcome::Won(_) => check_winner(board.squares()).is_some(),
                BoardOutcome::Draw => is_draw(board),
                BoardOutcome::Unresolved => {
                    check_winner(board.squares()).is_none() && !is_draw(board)
                }
            })
    }

    fn description() -> &'static str {
        "Winner table agrees with sub-board contents"
    }
}

/// Invariant: the constraint never points at a resolved sub-board.
pub struct ConstraintOpenInvariant;

impl Invariant<GameState> for ConstraintOpenInvariant {
    fn holds(state: &GameState) -> bool {
        match state.constraint {
            Constraint::Free => true,
            Constraint::Locked(board) => !state.outcomes[board.to_index()].is_resolved(),
        }
    }

    fn description() -> &'static str {
        "Constraint is free or points at an unresolved sub-board"
    }
}

/// Invariant: a game in progress that accepts moves has at least one.
pub struct ProgressInvariant;

impl Invariant<GameState> for ProgressInvariant {
    fn holds(state: &GameState) -> bool {
        state.status.is_over() || !state.moves_allowed || !state.legal_moves().is_empty()
    }

    fn description() -> &'static str {
        "An unfinished game always has a legal move"
    }
}

/// All ultimate tic-tac-toe invariants as a composable set.
pub type UltimateInvariants = (
    MonotonicBoardInvariant,
    OutcomeConsistentInvariant,
    ConstraintOpenInvariant,
    ProgressInvariant,
);

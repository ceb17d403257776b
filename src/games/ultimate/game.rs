//! The rules engine for ultimate tic-tac-toe.

use super::action::{IllegalMove, Move};
use super::invariants::{InvariantSet, UltimateInvariants};
use super::rules::{check_winner, is_draw, is_meta_draw};
use super::snapshot::{GameSnapshot, MoveOutcome};
use super::types::{BoardOutcome, Constraint, GameStatus, Player, Square, SubBoard};
use super::Position;
use crate::clock::TurnTimeout;
use tracing::{debug, info, instrument, warn};

/// Result of asking the engine to apply a move.
pub type MoveResult = Result<MoveOutcome, IllegalMove>;

/// Complete game state.
///
/// Only [`UltimateGame`] mutates it, through moves and forfeits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) boards: [SubBoard; 9],
    pub(crate) outcomes: [BoardOutcome; 9],
    pub(crate) to_move: Player,
    pub(crate) constraint: Constraint,
    pub(crate) status: GameStatus,
    pub(crate) moves_allowed: bool,
    pub(crate) history: Vec<Move>,
}

impl GameState {
    /// Creates a fresh game: empty boards, Player A to move, free constraint.
    pub fn new() -> Self {
        Self {
            boards: Default::default(),
            outcomes: [BoardOutcome::Unresolved; 9],
            to_move: Player::A,
            constraint: Constraint::Free,
            status: GameStatus::InProgress,
            moves_allowed: true,
            history: Vec::new(),
        }
    }

    /// Returns the sub-board at `board`.
    pub fn board(&self, board: Position) -> &SubBoard {
        &self.boards[board.to_index()]
    }

    /// Returns the sub-board winner table.
    pub fn outcomes(&self) -> &[BoardOutcome; 9] {
        &self.outcomes
    }

    /// Returns the player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns where the active player may move.
    pub fn constraint(&self) -> Constraint {
        self.constraint
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// False between a turn expiring and the next turn starting.
    pub fn moves_allowed(&self) -> bool {
        self.moves_allowed
    }

    /// Returns the accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Moves the engine would accept: empty cells of open sub-boards the
    /// constraint permits. Empty once the game is over or the turn expired.
    pub fn legal_moves(&self) -> Vec<(Position, Position)> {
        if self.status.is_over() || !self.moves_allowed {
            return Vec::new();
        }

        Position::ALL
            .into_iter()
            .filter(|board| {
                self.constraint.permits(*board) && !self.outcomes[board.to_index()].is_resolved()
            })
            .flat_map(|board| {
                self.boards[board.to_index()]
                    .empty_cells()
                    .into_iter()
                    .map(move |cell| (board, cell))
            })
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Ultimate tic-tac-toe rules engine.
#[derive(Debug, Clone, Default)]
pub struct UltimateGame {
    state: GameState,
}

impl UltimateGame {
    /// Creates a new game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Captures a snapshot for the view.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> GameSnapshot {
        let s = &self.state;
        GameSnapshot::capture(
            &s.boards,
            &s.outcomes,
            s.to_move,
            s.constraint,
            s.status,
            s.moves_allowed,
            s.history.len(),
        )
    }

    /// Applies a move given raw indices, rejecting anything off the grid.
    #[instrument(skip(self))]
    pub fn try_move(&mut self, board: usize, cell: usize) -> MoveResult {
        match (Position::from_index(board), Position::from_index(cell)) {
            (Some(board), Some(cell)) => self.apply_move(board, cell),
            _ => {
                warn!(board, cell, "Move off the grid");
                Err(IllegalMove::OutOfBounds { board, cell })
            }
        }
    }

    /// Applies a move for the active player.
    ///
    /// Preconditions are checked in a fixed order and the first failure
    /// rejects the move without touching the state.
    #[instrument(skip(self), fields(player = ?self.state.to_move))]
    pub fn apply_move(&mut self, board: Position, cell: Position) -> MoveResult {
        self.check_move(board, cell).inspect_err(|reason| {
            debug!(%reason, "Move rejected");
        })?;

        let player = self.state.to_move;
        let applied = Move::new(player, board, cell);
        self.state.boards[board.to_index()].set(cell, Square::Occupied(player));
        self.state.history.push(applied);

        let resolved = self.resolve_board(board);

        self.state.constraint = if self.state.outcomes[cell.to_index()].is_resolved() {
            Constraint::Free
        } else {
            Constraint::Locked(cell)
        };

        if let Some(winner) = check_winner(&self.state.outcomes) {
            info!(?winner, "Game won");
            self.state.status = GameStatus::Won(winner);
        } else if is_meta_draw(&self.state.outcomes) {
            info!("Game drawn");
            self.state.status = GameStatus::Draw;
        } else {
            self.state.to_move = player.opponent();
        }

        debug_assert!(
            UltimateInvariants::check_all(&self.state).is_ok(),
            "game invariants violated after {applied}"
        );

        info!(
            %applied,
            constraint = ?self.state.constraint,
            status = ?self.state.status,
            "Move applied"
        );

        Ok(MoveOutcome::new(
            applied,
            resolved,
            self.state.constraint,
            self.state.status,
        ))
    }

    /// Passes the turn to the opponent without marking anything.
    #[instrument(skip(self), fields(player = ?self.state.to_move))]
    pub fn forfeit_turn(&mut self) -> Result<Player, IllegalMove> {
        if self.state.status.is_over() {
            return Err(IllegalMove::GameOver);
        }

        let forfeited = self.state.to_move;
        self.state.to_move = forfeited.opponent();
        info!(?forfeited, next = ?self.state.to_move, "Turn forfeited");
        Ok(forfeited)
    }

    /// Every `(board, cell)` the active player could mark right now.
    pub fn legal_moves(&self) -> Vec<(Position, Position)> {
        self.state.legal_moves()
    }

    fn check_move(&self, board: Position, cell: Position) -> Result<(), IllegalMove> {
        let s = &self.state;
        if s.status.is_over() {
            return Err(IllegalMove::GameOver);
        }
        if !s.moves_allowed {
            return Err(IllegalMove::TurnExpired);
        }
        if let Constraint::Locked(locked) = s.constraint
            && locked != board
        {
            return Err(IllegalMove::WrongBoard(locked));
        }
        if s.outcomes[board.to_index()].is_resolved() {
            return Err(IllegalMove::BoardResolved(board));
        }
        if !s.boards[board.to_index()].is_empty(cell) {
            return Err(IllegalMove::CellOccupied { board, cell });
        }
        Ok(())
    }

    /// Settles the sub-board's winner table entry if the last move decided it.
    fn resolve_board(&mut self, board: Position) -> Option<(Position, BoardOutcome)> {
        let sub = &self.state.boards[board.to_index()];
        let outcome = if let Some(winner) = check_winner(sub.squares()) {
            BoardOutcome::Won(winner)
        } else if is_draw(sub) {
            BoardOutcome::Draw
        } else {
            return None;
        };

        info!(%board, ?outcome, "Sub-board resolved");
        self.state.outcomes[board.to_index()] = outcome;
        Some((board, outcome))
    }
}

impl TurnTimeout for UltimateGame {
    fn expire_turn(&mut self) -> Option<Player> {
        let forfeited = self.forfeit_turn().ok()?;
        self.state.moves_allowed = false;
        Some(forfeited)
    }

    fn resume_turn(&mut self) {
        debug!(player = ?self.state.to_move, "Turn resumed");
        self.state.moves_allowed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    #[test]
    fn test_opening_locks_to_cell_board() {
        let mut game = UltimateGame::new();
        let outcome = game.apply_move(Center, Center).unwrap();

        assert_eq!(*outcome.constraint(), Constraint::Locked(Center));
        assert_eq!(game.state().to_move(), Player::B);
        assert_eq!(game.state().board(Center).get(Center), Square::Occupied(Player::A));
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let mut game = UltimateGame::new();
        game.apply_move(Center, TopLeft).unwrap();
        let before = game.state().clone();

        assert_eq!(
            game.apply_move(Center, Center),
            Err(IllegalMove::WrongBoard(TopLeft))
        );
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_try_move_out_of_bounds() {
        let mut game = UltimateGame::new();
        assert_eq!(
            game.try_move(9, 0),
            Err(IllegalMove::OutOfBounds { board: 9, cell: 0 })
        );
        assert!(game.try_move(0, 8).is_ok());
    }

    #[test]
    fn test_expire_blocks_moves_until_resumed() {
        let mut game = UltimateGame::new();
        assert_eq!(game.expire_turn(), Some(Player::A));
        assert_eq!(game.apply_move(Center, Center), Err(IllegalMove::TurnExpired));

        game.resume_turn();
        let outcome = game.apply_move(Center, Center).unwrap();
        assert_eq!(outcome.applied().player, Player::B);
    }

    #[test]
    fn test_legal_moves_follow_constraint() {
        let mut game = UltimateGame::new();
        assert_eq!(game.legal_moves().len(), 81);

        game.apply_move(Center, TopLeft).unwrap();
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 9);
        assert!(moves.iter().all(|(board, _)| *board == TopLeft));

        game.expire_turn();
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_forfeit_after_game_over_rejected() {
        let mut game = UltimateGame::new();
        game.state.status = GameStatus::Won(Player::A);
        assert_eq!(game.forfeit_turn(), Err(IllegalMove::GameOver));
        assert_eq!(game.expire_turn(), None);
    }
}

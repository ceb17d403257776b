//! Tests for the ultimate tic-tac-toe rules engine.

use strictly_ultimate::invariants::{InvariantSet, UltimateInvariants};
use strictly_ultimate::rules::check_winner;
use strictly_ultimate::{
    BoardOutcome, Constraint, GameStatus, IllegalMove, MoveOutcome, Player, Position, Square,
    UltimateGame,
};
use Position::*;

/// Marks `(board, cell)` for `player`, forfeiting the opponent's turn first if needed.
fn mark(game: &mut UltimateGame, player: Player, board: Position, cell: Position) -> MoveOutcome {
    if game.state().to_move() != player {
        game.forfeit_turn().expect("Game in progress");
    }
    game.apply_move(board, cell)
        .unwrap_or_else(|e| panic!("{player} at {board}/{cell} rejected: {e}"))
}

/// Player A takes the top row of sub-boards while B forfeits every turn.
fn play_top_row_win(game: &mut UltimateGame) -> MoveOutcome {
    let script = [
        (TopLeft, TopCenter),
        (TopCenter, TopRight),
        (TopRight, TopLeft),
        (TopLeft, TopRight),
        (TopRight, TopCenter),
        (TopCenter, TopLeft),
        (TopLeft, TopLeft),
        (TopCenter, TopCenter),
    ];
    for (board, cell) in script {
        mark(game, Player::A, board, cell);
    }
    mark(game, Player::A, TopRight, TopRight)
}

#[test]
fn test_opening_center_center() {
    let mut game = UltimateGame::new();
    let outcome = game.apply_move(Center, Center).expect("Valid move");

    assert_eq!(*outcome.constraint(), Constraint::Locked(Center));
    assert_eq!(outcome.resolved(), &None);
    assert_eq!(game.state().to_move(), Player::B);
    assert_eq!(game.state().status(), GameStatus::InProgress);
}

#[test]
fn test_row_win_with_forced_turns() {
    let mut game = UltimateGame::new();

    game.apply_move(TopLeft, TopLeft).unwrap();
    game.forfeit_turn().unwrap();
    game.apply_move(TopLeft, TopCenter).unwrap();
    assert_eq!(game.state().outcomes()[0], BoardOutcome::Unresolved);

    // B sends A back to the top-left board.
    game.apply_move(TopCenter, TopLeft).unwrap();

    let outcome = game.apply_move(TopLeft, TopRight).unwrap();
    assert_eq!(
        outcome.resolved(),
        &Some((TopLeft, BoardOutcome::Won(Player::A)))
    );
    assert_eq!(*outcome.constraint(), Constraint::Locked(TopRight));

    // Cell 0 names the decided board, so the next player chooses freely.
    let outcome = game.apply_move(TopRight, TopLeft).unwrap();
    assert_eq!(*outcome.constraint(), Constraint::Free);

    assert_eq!(
        game.apply_move(TopLeft, Center),
        Err(IllegalMove::BoardResolved(TopLeft))
    );
    assert_eq!(game.state().outcomes()[0], BoardOutcome::Won(Player::A));
}

#[test]
fn test_occupied_cell_rejected_and_unchanged() {
    let mut game = UltimateGame::new();
    game.apply_move(Center, Center).unwrap();
    game.apply_move(Center, TopLeft).unwrap();
    game.apply_move(TopLeft, Center).unwrap();

    let before = game.state().clone();
    assert_eq!(
        game.apply_move(Center, Center),
        Err(IllegalMove::CellOccupied {
            board: Center,
            cell: Center
        })
    );
    assert_eq!(game.state(), &before);
    assert_eq!(
        game.state().board(Center).get(Center),
        Square::Occupied(Player::A)
    );
}

#[test]
fn test_wrong_board_rejected() {
    let mut game = UltimateGame::new();
    game.apply_move(Center, BottomRight).unwrap();

    assert_eq!(
        game.apply_move(TopLeft, TopLeft),
        Err(IllegalMove::WrongBoard(BottomRight))
    );
    assert_eq!(game.state().history().len(), 1);
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut game = UltimateGame::new();
    assert_eq!(
        game.try_move(9, 0),
        Err(IllegalMove::OutOfBounds { board: 9, cell: 0 })
    );
    assert!(game.try_move(4, 4).is_ok());
}

#[test]
fn test_meta_win_over_top_row() {
    let mut game = UltimateGame::new();
    let outcome = play_top_row_win(&mut game);

    assert_eq!(
        outcome.resolved(),
        &Some((TopRight, BoardOutcome::Won(Player::A)))
    );
    assert!(outcome.ended_game());
    assert_eq!(game.state().status(), GameStatus::Won(Player::A));
    assert_eq!(game.state().to_move(), Player::A);
    assert!(UltimateInvariants::check_all(game.state()).is_ok());
}

#[test]
fn test_game_over_rejected_before_anything_else() {
    let mut game = UltimateGame::new();
    play_top_row_win(&mut game);

    // Off-constraint, into a decided board: still reported as game over.
    assert_eq!(game.apply_move(TopLeft, TopLeft), Err(IllegalMove::GameOver));
    assert_eq!(game.apply_move(Center, Center), Err(IllegalMove::GameOver));
    assert_eq!(game.forfeit_turn(), Err(IllegalMove::GameOver));
}

#[test]
fn test_meta_check_matches_cell_check() {
    let mut table = [BoardOutcome::Unresolved; 9];
    let mut cells = [Square::Empty; 9];
    for i in [0, 4, 8] {
        table[i] = BoardOutcome::Won(Player::B);
        cells[i] = Square::Occupied(Player::B);
    }
    assert_eq!(check_winner(&table), Some(Player::B));
    assert_eq!(check_winner(&table), check_winner(&cells));

    table[4] = BoardOutcome::Draw;
    assert_eq!(check_winner(&table), None);
}

#[test]
fn test_forfeit_changes_only_the_player() {
    let mut game = UltimateGame::new();
    game.apply_move(Center, TopLeft).unwrap();
    let before = game.state().clone();

    assert_eq!(game.forfeit_turn(), Ok(Player::B));

    let after = game.state();
    assert_eq!(after.to_move(), Player::A);
    assert_eq!(after.constraint(), before.constraint());
    assert_eq!(after.outcomes(), before.outcomes());
    assert_eq!(after.history(), before.history());
    for board in Position::ALL {
        assert_eq!(after.board(board), before.board(board));
    }
}

#[test]
fn test_drawn_board_is_resolved() {
    use Player::{A, B};
    let mut game = UltimateGame::new();
    // A B A / B A A / B A B has no line.
    let pattern = [A, B, A, B, A, A, B, A, B];

    let mut last = None;
    for (cell, player) in Position::ALL.into_iter().zip(pattern) {
        let outcome = mark(&mut game, player, Center, cell);
        // Bounce back to the center board through the board the cell named.
        if cell != Center && cell != BottomRight {
            let mover = game.state().to_move();
            mark(&mut game, mover, cell, Center);
        }
        last = Some(outcome);
    }

    let outcome = last.expect("Nine moves played");
    assert_eq!(outcome.resolved(), &Some((Center, BoardOutcome::Draw)));
    assert_eq!(game.state().outcomes()[4], BoardOutcome::Draw);
    assert_eq!(*outcome.constraint(), Constraint::Locked(BottomRight));
    assert_eq!(game.state().status(), GameStatus::InProgress);

    // A move naming the drawn board frees the next player.
    let mover = game.state().to_move();
    let outcome = mark(&mut game, mover, BottomRight, Center);
    assert_eq!(*outcome.constraint(), Constraint::Free);
    assert_eq!(
        game.apply_move(Center, Center),
        Err(IllegalMove::BoardResolved(Center))
    );
}

#[test]
fn test_cells_never_change_once_marked() {
    let mut game = UltimateGame::new();
    play_top_row_win(&mut game);

    for mv in game.state().history() {
        assert_eq!(
            game.state().board(mv.board).get(mv.cell),
            Square::Occupied(mv.player)
        );
    }
}

#[test]
fn test_all_boards_decided_without_line_is_a_draw() {
    use Player::{A, B};
    let mut game = UltimateGame::new();

    // Board 0 for A, bouncing back through board 1.
    mark(&mut game, A, TopLeft, TopLeft);
    mark(&mut game, A, TopLeft, TopCenter);
    mark(&mut game, B, TopCenter, TopLeft);
    mark(&mut game, A, TopLeft, TopRight);
    // Board 2 for A, then board 1 for B.
    mark(&mut game, A, TopRight, TopLeft);
    mark(&mut game, A, TopRight, TopRight);
    mark(&mut game, A, TopRight, TopCenter);
    mark(&mut game, B, TopCenter, TopRight);
    mark(&mut game, B, TopCenter, TopCenter);

    // Every later cell names a decided board, so play is free throughout.
    // Winners A B A / A B B / B A A leave no meta line.
    let rest = [
        (MiddleLeft, A),
        (Center, B),
        (MiddleRight, B),
        (BottomLeft, B),
        (BottomCenter, A),
        (BottomRight, A),
    ];
    let mut last = None;
    for (board, player) in rest {
        assert_eq!(game.state().status(), GameStatus::InProgress);
        mark(&mut game, player, board, TopLeft);
        mark(&mut game, player, board, TopCenter);
        last = Some(mark(&mut game, player, board, TopRight));
    }

    let outcome = last.expect("Boards played");
    assert!(outcome.ended_game());
    assert_eq!(game.state().status(), GameStatus::Draw);
    assert_eq!(game.state().status().winner(), None);
    assert!(game.state().outcomes().iter().all(|o| o.is_resolved()));
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.apply_move(Center, Center), Err(IllegalMove::GameOver));
    assert_eq!(game.forfeit_turn(), Err(IllegalMove::GameOver));
}

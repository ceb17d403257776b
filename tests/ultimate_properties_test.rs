//! Property-based tests over random sequences of legal moves and forfeits.

use proptest::prelude::*;
use strictly_ultimate::invariants::{InvariantSet, UltimateInvariants};
use strictly_ultimate::{BoardOutcome, Constraint, GameStatus, Position, Square, UltimateGame};

/// One turn: either forfeit, or pick a legal move by index.
#[derive(Debug, Clone, Copy)]
enum Turn {
    Forfeit,
    Play(usize),
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    prop_oneof![
        1 => Just(Turn::Forfeit),
        6 => (0usize..81).prop_map(Turn::Play),
    ]
}

fn arb_turns() -> impl Strategy<Value = Vec<Turn>> {
    proptest::collection::vec(arb_turn(), 0..200)
}

fn cells(game: &UltimateGame) -> Vec<Square> {
    Position::ALL
        .into_iter()
        .flat_map(|board| *game.state().board(board).squares())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_marked_cells_and_decided_boards_never_change(turns in arb_turns()) {
        let mut game = UltimateGame::new();

        for turn in turns {
            if game.state().status().is_over() {
                break;
            }
            let cells_before = cells(&game);
            let outcomes_before = *game.state().outcomes();

            match turn {
                Turn::Forfeit => {
                    prop_assert!(game.forfeit_turn().is_ok());
                    prop_assert_eq!(cells(&game), cells_before);
                    prop_assert_eq!(*game.state().outcomes(), outcomes_before);
                }
                Turn::Play(idx) => {
                    let moves = game.legal_moves();
                    prop_assert!(!moves.is_empty(), "game in progress has no legal move");
                    let (board, cell) = moves[idx % moves.len()];
                    prop_assert!(game.apply_move(board, cell).is_ok());

                    for (before, after) in cells_before.iter().zip(cells(&game)) {
                        if *before != Square::Empty {
                            prop_assert_eq!(*before, after);
                        }
                    }
                    for (before, after) in outcomes_before.iter().zip(game.state().outcomes()) {
                        if before.is_resolved() {
                            prop_assert_eq!(before, after);
                        }
                    }
                }
            }

            if let Constraint::Locked(board) = game.state().constraint() {
                let outcome = game.state().outcomes()[board.to_index()];
                prop_assert_eq!(outcome, BoardOutcome::Unresolved);
            }
            if game.state().status() == GameStatus::InProgress {
                prop_assert!(!game.legal_moves().is_empty());
            }
            prop_assert!(UltimateInvariants::check_all(game.state()).is_ok());
        }
    }

    #[test]
    fn prop_every_listed_move_is_accepted(turns in arb_turns()) {
        let mut game = UltimateGame::new();

        for turn in turns {
            if game.state().status().is_over() {
                break;
            }
            let Turn::Play(idx) = turn else {
                game.forfeit_turn().unwrap();
                continue;
            };

            let moves = game.legal_moves();
            for (board, cell) in &moves {
                let mut trial = game.clone();
                prop_assert!(trial.apply_move(*board, *cell).is_ok());
            }
            let (board, cell) = moves[idx % moves.len()];
            game.apply_move(board, cell).unwrap();
        }
    }
}

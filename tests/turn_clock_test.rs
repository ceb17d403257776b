//! Tests for the turn clock driving the real rules engine.

use strictly_ultimate::{
    ClockConfig, ClockState, IllegalMove, Player, Position, TickOutcome, TurnClock, UltimateGame,
};
use std::time::Duration;

fn short_clock() -> TurnClock {
    TurnClock::new(ClockConfig::new(3, 2, Duration::from_millis(10)))
}

#[test]
fn test_rapid_restarts_leave_one_live_token() {
    let mut clock = TurnClock::default();
    let mut game = UltimateGame::new();

    let tokens: Vec<_> = (0..5).map(|_| clock.start()).collect();
    let live = *tokens.last().unwrap();

    for stale in &tokens[..4] {
        assert_eq!(clock.tick(*stale, &mut game), TickOutcome::Stale);
    }
    assert_eq!(
        clock.tick(live, &mut game),
        TickOutcome::Counted { remaining: 14 }
    );
    assert_eq!(clock.token(), Some(live));
}

#[test]
fn test_expiry_forfeits_exactly_once() {
    let mut clock = short_clock();
    let mut game = UltimateGame::new();
    let token = clock.start();

    assert_eq!(clock.tick(token, &mut game), TickOutcome::Counted { remaining: 2 });
    assert_eq!(clock.tick(token, &mut game), TickOutcome::Counted { remaining: 1 });
    assert_eq!(
        clock.tick(token, &mut game),
        TickOutcome::Expired {
            forfeited: Player::A
        }
    );
    assert_eq!(game.state().to_move(), Player::B);
    assert!(clock.is_expired());

    // Moves wait for the notice to finish.
    assert_eq!(
        game.apply_move(Position::Center, Position::Center),
        Err(IllegalMove::TurnExpired)
    );

    assert_eq!(clock.tick(token, &mut game), TickOutcome::Notice { remaining: 1 });
    let TickOutcome::Restarted { token: next } = clock.tick(token, &mut game) else {
        panic!("Expected a new countdown after the notice");
    };

    assert_ne!(next, token);
    assert_eq!(game.state().to_move(), Player::B);
    assert_eq!(clock.state(), ClockState::Running { remaining: 3 });
    assert!(game.apply_move(Position::Center, Position::Center).is_ok());

    // The expired countdown's token is dead.
    assert_eq!(clock.tick(token, &mut game), TickOutcome::Stale);
}

#[test]
fn test_cancel_stops_countdown() {
    let mut clock = short_clock();
    let mut game = UltimateGame::new();
    let token = clock.start();

    clock.cancel();
    assert_eq!(clock.state(), ClockState::Completed);
    assert_eq!(clock.tick(token, &mut game), TickOutcome::Stale);
    assert_eq!(game.state().to_move(), Player::A);
}

#[test]
fn test_expiry_after_game_over_halts() {
    let mut clock = TurnClock::new(ClockConfig::new(1, 1, Duration::from_secs(1)));
    let mut game = UltimateGame::new();
    let moves = [(0, 1), (1, 2), (2, 0), (0, 2), (2, 1), (1, 0), (0, 0), (1, 1), (2, 2)];
    for (board, cell) in moves {
        if game.state().to_move() == Player::B {
            game.forfeit_turn().unwrap();
        }
        game.try_move(board, cell).unwrap();
    }
    assert!(game.state().status().is_over());

    let token = clock.start();
    assert_eq!(clock.tick(token, &mut game), TickOutcome::Halted);
    assert_eq!(clock.state(), ClockState::Idle);
}

#[test]
fn test_tick_counts_clamped_to_one() {
    let config = ClockConfig::new(0, 0, Duration::from_secs(1));
    assert_eq!(*config.turn_ticks(), 1);
    assert_eq!(*config.notice_ticks(), 1);
    assert_eq!(ClockConfig::default().turn_seconds(), 15);
}

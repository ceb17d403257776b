//! Strictly Ultimate - ultimate tic-tac-toe with a per-turn countdown
//!
//! # Architecture
//!
//! - **Games**: the rules engine ([`UltimateGame`]) for nine linked sub-boards
//! - **Clock**: a token-guarded countdown ([`TurnClock`]) that forfeits idle turns
//! - **Controller**: the single owner of engine and clock, fed by view requests
//!   and clock ticks ([`GameController`])
//! - **View**: anything implementing [`GameView`]; the binary ships a terminal UI
//!
//! # Example
//!
//! ```
//! use strictly_ultimate::{Constraint, Player, Position, UltimateGame};
//!
//! let mut game = UltimateGame::new();
//! let outcome = game.apply_move(Position::Center, Position::TopLeft).unwrap();
//! assert_eq!(*outcome.constraint(), Constraint::Locked(Position::TopLeft));
//! assert_eq!(game.state().to_move(), Player::B);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clock;
mod config;
mod controller;
mod demo;
mod games;
mod view;

// Crate-level exports - Clock
pub use clock::{
    ClockConfig, ClockState, ClockToken, ManualScheduler, NOTICE_TICKS, TICK_INTERVAL,
    TURN_TICKS, TickOutcome, TickScheduler, Ticker, TurnClock, TurnTimeout,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, PlayerStyle};

// Crate-level exports - Controller
pub use controller::{
    ControllerClosed, ControllerEvent, ControllerHandle, GameController, GameView, Phase,
    spawn_controller,
};

// Crate-level exports - Scripted play
pub use demo::{DEFAULT_SCRIPT, DemoStep, run_demo};

// Crate-level exports - Views
pub use view::{ChannelView, TracingView, ViewEvent};

// Crate-level exports - Game types
pub use games::ultimate::{
    BoardOutcome, Constraint, GameSnapshot, GameState, GameStatus, IllegalMove, Lean, Move,
    MoveOutcome, MoveResult, Player, Position, Square, SubBoard, UltimateGame, rules_text,
};

// Crate-level exports - Rules and invariants
pub use games::ultimate::invariants;
pub use games::ultimate::rules;

//! Application state and logic.

use super::input::{Cursor, move_cursor};
use crossterm::event::KeyCode;
use strictly_ultimate::{GameConfig, GameSnapshot, Player, UltimateGame, ViewEvent};
use tracing::debug;

/// Which screen the TUI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Rules overlay.
    Instructions,
    /// The board.
    Board,
}

/// What a key press asks of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Leave the instructions.
    Start,
    /// Mark the cell under the cursor.
    Move {
        /// Sub-board index.
        board: usize,
        /// Cell index.
        cell: usize,
    },
    /// Start over.
    Restart,
    /// Exit the TUI.
    Quit,
}

/// Main application state.
pub struct App {
    config: GameConfig,
    screen: Screen,
    snapshot: GameSnapshot,
    remaining: u32,
    notice: Option<Player>,
    status_message: String,
    cursor: Cursor,
}

impl App {
    /// Creates a new application.
    pub fn new(config: GameConfig, turn_ticks: u32) -> Self {
        Self {
            config,
            screen: Screen::Instructions,
            snapshot: UltimateGame::new().snapshot(),
            remaining: turn_ticks,
            notice: None,
            status_message: String::new(),
            cursor: Cursor::new(),
        }
    }

    /// Gets the player styles.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Gets the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Gets the latest snapshot.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Gets the countdown value.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Player whose turn-loss notice is showing.
    pub fn notice(&self) -> Option<Player> {
        self.notice
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Gets the cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Handles a notification from the controller.
    pub fn handle_event(&mut self, event: ViewEvent) {
        debug!(?event, "Handling view event");

        match event {
            ViewEvent::StateChanged(snapshot) => {
                if *snapshot.moves_allowed() {
                    self.notice = None;
                }
                let status = *snapshot.status();
                self.status_message = match status.winner() {
                    Some(player) => format!(
                        "{} {} wins the game! Press 'r' to restart or 'q' to quit.",
                        self.config.style(player).symbol(),
                        self.config.style(player).name()
                    ),
                    None if status.is_over() => {
                        "The game is a draw! Press 'r' to restart or 'q' to quit.".to_string()
                    }
                    None => String::new(),
                };
                self.snapshot = *snapshot;
            }
            ViewEvent::TurnTick(remaining) => self.remaining = remaining,
            ViewEvent::TurnExpired(player) => self.notice = Some(player),
            ViewEvent::MoveRejected(reason) => self.status_message = reason.to_string(),
        }
    }

    /// Maps a key press to a controller request, updating local state.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Request> {
        match (self.screen, key) {
            (_, KeyCode::Char('q')) => Some(Request::Quit),
            (Screen::Instructions, KeyCode::Char('s') | KeyCode::Enter) => {
                self.screen = Screen::Board;
                Some(Request::Start)
            }
            (Screen::Instructions, _) => None,
            (Screen::Board, KeyCode::Char('r')) => {
                self.notice = None;
                self.status_message = "Game restarted.".to_string();
                Some(Request::Restart)
            }
            (Screen::Board, KeyCode::Enter | KeyCode::Char(' ')) => {
                let (board, cell) = self.cursor.target();
                Some(Request::Move {
                    board: board.to_index(),
                    cell: cell.to_index(),
                })
            }
            (Screen::Board, key) => {
                self.cursor = move_cursor(self.cursor, key);
                None
            }
        }
    }
}

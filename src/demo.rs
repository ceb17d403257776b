//! Headless scripted game, driven through the controller with a hand-cranked clock.

use crate::clock::{ClockConfig, ManualScheduler};
use crate::controller::GameController;
use crate::games::ultimate::GameSnapshot;
use crate::view::TracingView;
use tracing::{info, instrument, warn};

/// One step of a scripted game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoStep {
    /// The active player moves at `(board, cell)`.
    Move(usize, usize),
    /// The active player lets the clock run out; ticks continue through the notice.
    Timeout,
}

/// The built-in script: Player A takes the top-left board while Player B
/// sits out a turn, then B sends A back to the decided board.
pub const DEFAULT_SCRIPT: &[DemoStep] = &[
    DemoStep::Move(0, 0),
    DemoStep::Timeout,
    DemoStep::Move(0, 1),
    DemoStep::Move(1, 0),
    DemoStep::Move(0, 2),
    DemoStep::Move(2, 0),
    DemoStep::Move(0, 4),
    DemoStep::Move(4, 4),
];

/// Plays `script` and returns the final snapshot.
#[instrument(skip(script), fields(steps = script.len()))]
pub fn run_demo(script: &[DemoStep]) -> GameSnapshot {
    let clock = ClockConfig::default();
    let mut controller = GameController::new(TracingView::new(), ManualScheduler::new(), clock);
    controller.request_start();

    for step in script {
        match *step {
            DemoStep::Move(board, cell) => {
                if let Err(reason) = controller.request_move(board, cell) {
                    warn!(board, cell, %reason, "Scripted move declined");
                }
            }
            DemoStep::Timeout => {
                // Countdown plus notice; the last tick restarts the clock.
                let ticks = clock.turn_ticks() + clock.notice_ticks();
                for _ in 0..ticks {
                    if let Some(token) = controller.scheduler().scheduled() {
                        controller.on_tick(token);
                    }
                }
            }
        }
    }

    let snapshot = controller.game().snapshot();
    info!(status = ?snapshot.status(), moves = snapshot.move_count(), "Demo finished");
    snapshot
}

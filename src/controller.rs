//! Game controller: the single owner of the rules engine and the turn clock.
//!
//! Views talk to the controller through [`ControllerHandle`]; the controller
//! talks back through [`GameView`]. All mutations happen inside
//! [`GameController::handle`], one event at a time.

use crate::clock::{ClockConfig, ClockToken, TickOutcome, TickScheduler, Ticker, TurnClock};
use crate::games::ultimate::{GameSnapshot, IllegalMove, MoveResult, Player, UltimateGame};
use derive_more::{Display, Error};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Receives notifications from the controller.
pub trait GameView {
    /// Called after every accepted move, forfeit, start, restart and resumed turn.
    fn on_state_changed(&mut self, snapshot: &GameSnapshot);

    /// Called on each clock tick, and with the full duration when a countdown starts.
    fn on_turn_tick(&mut self, remaining: u32);

    /// Called once per forfeited turn.
    fn on_turn_expired(&mut self, player: Player);

    /// Called when a requested move is declined.
    fn on_move_rejected(&mut self, _reason: IllegalMove) {}
}

/// Whether the game has left the instructions screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Rules are showing; moves are refused.
    #[default]
    Instructions,
    /// Turns are being played (or the game just ended).
    Playing,
}

/// Events processed by the controller loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Leave the instructions and start the first countdown.
    Start,
    /// Mark a cell for the active player.
    Move {
        /// Sub-board index (0-8).
        board: usize,
        /// Cell index (0-8).
        cell: usize,
    },
    /// Discard the game and begin a new one.
    Restart,
    /// One clock tick for the countdown identified by the token.
    Tick(ClockToken),
    /// Stop the controller loop.
    Shutdown,
}

/// Drives one game on behalf of a view.
#[derive(Debug)]
pub struct GameController<V, S> {
    game: UltimateGame,
    clock: TurnClock,
    phase: Phase,
    view: V,
    scheduler: S,
}

impl<V: GameView, S: TickScheduler> GameController<V, S> {
    /// Creates a controller showing the instructions.
    #[instrument(skip(view, scheduler))]
    pub fn new(view: V, scheduler: S, clock: ClockConfig) -> Self {
        info!("Creating game controller");
        Self {
            game: UltimateGame::new(),
            clock: TurnClock::new(clock),
            phase: Phase::Instructions,
            view,
            scheduler,
        }
    }

    /// Returns the rules engine.
    pub fn game(&self) -> &UltimateGame {
        &self.game
    }

    /// Returns the turn clock.
    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Consumes the controller, returning the view.
    pub fn into_view(mut self) -> V {
        self.scheduler.cancel();
        self.view
    }

    /// Dispatches one event. Returns false once the loop should stop.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: ControllerEvent) -> bool {
        match event {
            ControllerEvent::Start => self.request_start(),
            ControllerEvent::Move { board, cell } => {
                let _ = self.request_move(board, cell);
            }
            ControllerEvent::Restart => self.request_restart(),
            ControllerEvent::Tick(token) => self.on_tick(token),
            ControllerEvent::Shutdown => return false,
        }
        true
    }

    /// Leaves the instructions and starts the first countdown.
    ///
    /// Later calls do nothing.
    #[instrument(skip(self))]
    pub fn request_start(&mut self) {
        if self.phase == Phase::Playing {
            debug!("Start requested while already playing");
            return;
        }

        info!("Game started");
        self.phase = Phase::Playing;
        self.start_countdown();
        self.view.on_state_changed(&self.game.snapshot());
    }

    /// Attempts a move for the active player.
    #[instrument(skip(self))]
    pub fn request_move(&mut self, board: usize, cell: usize) -> MoveResult {
        let result = if self.phase == Phase::Instructions {
            Err(IllegalMove::NotStarted)
        } else {
            self.game.try_move(board, cell)
        };

        match &result {
            Ok(outcome) => {
                self.clock.cancel();
                if outcome.ended_game() {
                    info!(status = ?outcome.status(), "Game over, clock stopped");
                    self.scheduler.cancel();
                } else {
                    self.start_countdown();
                }
                self.view.on_state_changed(&self.game.snapshot());
            }
            Err(reason) => {
                debug!(%reason, "Move declined");
                self.view.on_move_rejected(*reason);
            }
        }

        result
    }

    /// Discards the game and begins a fresh one.
    ///
    /// Once play has started, the new game's countdown begins immediately.
    #[instrument(skip(self))]
    pub fn request_restart(&mut self) {
        info!("Restarting game");
        self.game = UltimateGame::new();
        self.clock.reset();
        self.scheduler.cancel();

        if self.phase == Phase::Playing {
            self.start_countdown();
        }
        self.view.on_state_changed(&self.game.snapshot());
    }

    /// Applies one clock tick.
    #[instrument(skip(self))]
    pub fn on_tick(&mut self, token: ClockToken) {
        match self.clock.tick(token, &mut self.game) {
            TickOutcome::Stale => {}
            TickOutcome::Counted { remaining } => self.view.on_turn_tick(remaining),
            TickOutcome::Expired { forfeited } => {
                self.view.on_turn_tick(0);
                self.view.on_turn_expired(forfeited);
                self.view.on_state_changed(&self.game.snapshot());
            }
            TickOutcome::Notice { remaining } => {
                debug!(remaining, "Turn-loss notice showing");
            }
            TickOutcome::Restarted { token } => {
                self.scheduler.schedule(token);
                self.view.on_turn_tick(*self.clock.config().turn_ticks());
                self.view.on_state_changed(&self.game.snapshot());
            }
            TickOutcome::Halted => {
                warn!("Countdown ran out after the game ended");
                self.scheduler.cancel();
            }
        }
    }

    fn start_countdown(&mut self) {
        let token = self.clock.start();
        self.scheduler.schedule(token);
        self.view.on_turn_tick(*self.clock.config().turn_ticks());
    }
}

impl<V: GameView, S: TickScheduler> GameController<V, S> {
    /// Processes events until shutdown or until every handle is dropped.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<ControllerEvent>) -> V {
        info!("Controller loop started");
        while let Some(event) = events.recv().await {
            if !self.handle(event) {
                break;
            }
        }
        info!("Controller loop stopped");
        self.into_view()
    }
}

/// The controller loop is no longer running.
#[derive(Debug, Clone, Copy, Display, Error)]
#[display("Game controller has shut down")]
pub struct ControllerClosed;

/// Cloneable sender of view requests.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    events: mpsc::UnboundedSender<ControllerEvent>,
}

impl ControllerHandle {
    /// Wraps an event sender.
    pub fn new(events: mpsc::UnboundedSender<ControllerEvent>) -> Self {
        Self { events }
    }

    fn send(&self, event: ControllerEvent) -> Result<(), ControllerClosed> {
        self.events.send(event).map_err(|_| ControllerClosed)
    }

    /// Requests a move at `(board, cell)`.
    pub fn request_move(&self, board: usize, cell: usize) -> Result<(), ControllerClosed> {
        self.send(ControllerEvent::Move { board, cell })
    }

    /// Requests a fresh game.
    pub fn request_restart(&self) -> Result<(), ControllerClosed> {
        self.send(ControllerEvent::Restart)
    }

    /// Requests leaving the instructions screen.
    pub fn request_start(&self) -> Result<(), ControllerClosed> {
        self.send(ControllerEvent::Start)
    }

    /// Asks the controller loop to stop.
    pub fn shutdown(&self) -> Result<(), ControllerClosed> {
        self.send(ControllerEvent::Shutdown)
    }
}

/// Spawns a controller on the current tokio runtime with a real-time ticker.
///
/// The join handle yields the view back once the loop stops.
#[instrument(skip(view))]
pub fn spawn_controller<V>(view: V, clock: ClockConfig) -> (ControllerHandle, JoinHandle<V>)
where
    V: GameView + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    // Weak, so the loop ends once every handle is dropped.
    let tick_tx = tx.downgrade();
    let ticker = Ticker::new(*clock.tick_interval(), move |token| {
        tick_tx
            .upgrade()
            .is_some_and(|tx| tx.send(ControllerEvent::Tick(token)).is_ok())
    });

    let controller = GameController::new(view, ticker, clock);
    let task = tokio::spawn(controller.run(rx));
    (ControllerHandle::new(tx), task)
}

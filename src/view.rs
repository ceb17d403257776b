//! Ready-made [`GameView`] implementations.

use crate::controller::GameView;
use crate::games::ultimate::{GameSnapshot, IllegalMove, Player};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A controller notification, as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// New game state.
    StateChanged(Box<GameSnapshot>),
    /// Countdown value.
    TurnTick(u32),
    /// A player lost their turn.
    TurnExpired(Player),
    /// A move was declined.
    MoveRejected(IllegalMove),
}

/// Forwards notifications over a channel to a render loop.
#[derive(Debug, Clone)]
pub struct ChannelView {
    tx: mpsc::UnboundedSender<ViewEvent>,
}

impl ChannelView {
    /// Creates the view and the receiver the render loop reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ViewEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, event: ViewEvent) {
        if self.tx.send(event).is_err() {
            debug!("Render loop gone, dropping view event");
        }
    }
}

impl GameView for ChannelView {
    fn on_state_changed(&mut self, snapshot: &GameSnapshot) {
        self.forward(ViewEvent::StateChanged(Box::new(snapshot.clone())));
    }

    fn on_turn_tick(&mut self, remaining: u32) {
        self.forward(ViewEvent::TurnTick(remaining));
    }

    fn on_turn_expired(&mut self, player: Player) {
        self.forward(ViewEvent::TurnExpired(player));
    }

    fn on_move_rejected(&mut self, reason: IllegalMove) {
        self.forward(ViewEvent::MoveRejected(reason));
    }
}

/// Logs every notification; snapshots are logged as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingView;

impl TracingView {
    /// Creates the view.
    pub fn new() -> Self {
        Self
    }
}

impl GameView for TracingView {
    fn on_state_changed(&mut self, snapshot: &GameSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(json) => info!(snapshot = %json, "State changed"),
            Err(e) => warn!(error = %e, "Failed to serialize snapshot"),
        }
    }

    fn on_turn_tick(&mut self, remaining: u32) {
        debug!(remaining, "Tick");
    }

    fn on_turn_expired(&mut self, player: Player) {
        info!(?player, "{} lost their turn!", player);
    }

    fn on_move_rejected(&mut self, reason: IllegalMove) {
        info!(%reason, "Move rejected");
    }
}

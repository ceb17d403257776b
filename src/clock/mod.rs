//! Per-turn countdown.
//!
//! [`TurnClock`] is a pure state machine advanced by [`TurnClock::tick`].
//! Every countdown gets a fresh [`ClockToken`]; ticks carrying an older
//! token are ignored, so a timer scheduled for a previous turn can never
//! act on the current one. Real time comes from a [`TickScheduler`] such as
//! the tokio-backed [`Ticker`].

mod ticker;

pub use ticker::Ticker;

use crate::games::ultimate::Player;
use derive_getters::Getters;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Ticks a player has to move.
pub const TURN_TICKS: u32 = 15;

/// Ticks the turn-loss notice stays up before the next countdown begins.
pub const NOTICE_TICKS: u32 = 5;

/// Wall-clock length of one tick.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Timing parameters of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct ClockConfig {
    /// Ticks per turn.
    turn_ticks: u32,
    /// Ticks the expiry notice is held.
    notice_ticks: u32,
    /// Wall-clock length of one tick.
    tick_interval: Duration,
}

impl ClockConfig {
    /// Creates a clock configuration. Tick counts are at least one.
    #[instrument]
    pub fn new(turn_ticks: u32, notice_ticks: u32, tick_interval: Duration) -> Self {
        Self {
            turn_ticks: turn_ticks.max(1),
            notice_ticks: notice_ticks.max(1),
            tick_interval,
        }
    }

    /// Whole seconds a player has per turn.
    pub fn turn_seconds(&self) -> u64 {
        (self.tick_interval * self.turn_ticks).as_secs()
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::new(TURN_TICKS, NOTICE_TICKS, TICK_INTERVAL)
    }
}

/// Identifies one countdown. Only the latest token is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockToken(u64);

impl ClockToken {
    /// The generation this token was issued for.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Where the clock is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Not counting (before the first turn, after a restart, or after game over).
    Idle,
    /// Counting down the active player's turn.
    Running {
        /// Ticks left.
        remaining: u32,
    },
    /// The turn ended with an accepted move.
    Completed,
    /// The turn ran out and was forfeited; the notice is showing.
    Expired {
        /// Notice ticks left before the next countdown.
        notice_remaining: u32,
    },
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The token is outdated or the clock is not counting.
    Stale,
    /// The countdown advanced.
    Counted {
        /// Ticks left.
        remaining: u32,
    },
    /// The countdown reached zero and the turn was forfeited.
    Expired {
        /// The player who lost the turn.
        forfeited: Player,
    },
    /// The expiry notice is still showing.
    Notice {
        /// Notice ticks left.
        remaining: u32,
    },
    /// The notice ended and a new countdown began.
    Restarted {
        /// Token of the new countdown.
        token: ClockToken,
    },
    /// The countdown ran out but the game could not forfeit (it is over).
    Halted,
}

/// The rules engine side of a timeout.
pub trait TurnTimeout {
    /// Forfeits the active player's turn and blocks moves until resumed.
    ///
    /// Returns the player who lost the turn, or `None` if the game is over.
    fn expire_turn(&mut self) -> Option<Player>;

    /// Allows moves again for the new active player.
    fn resume_turn(&mut self);
}

/// Arranges for [`TurnClock::tick`] to be called once per tick interval.
pub trait TickScheduler {
    /// Starts delivering ticks for `token`, replacing any earlier schedule.
    fn schedule(&mut self, token: ClockToken);

    /// Stops delivering ticks.
    fn cancel(&mut self);
}

/// Scheduler that records requests and leaves tick delivery to the caller.
///
/// Used to drive the clock by hand, e.g. in scripted games.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualScheduler {
    scheduled: Option<ClockToken>,
    history: Vec<ClockToken>,
}

impl ManualScheduler {
    /// Creates an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// The token ticks are currently scheduled for.
    pub fn scheduled(&self) -> Option<ClockToken> {
        self.scheduled
    }

    /// Every token ever scheduled, oldest first.
    pub fn history(&self) -> &[ClockToken] {
        &self.history
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, token: ClockToken) {
        self.scheduled = Some(token);
        self.history.push(token);
    }

    fn cancel(&mut self) {
        self.scheduled = None;
    }
}

/// Single-timer countdown for the active turn.
#[derive(Debug, Clone)]
pub struct TurnClock {
    config: ClockConfig,
    state: ClockState,
    generation: u64,
}

impl TurnClock {
    /// Creates an idle clock.
    #[instrument]
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            state: ClockState::Idle,
            generation: 0,
        }
    }

    /// Returns the timing parameters.
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Returns the current state.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// True while the expiry notice is showing.
    pub fn is_expired(&self) -> bool {
        matches!(self.state, ClockState::Expired { .. })
    }

    /// Token of the live countdown, if ticks are expected.
    pub fn token(&self) -> Option<ClockToken> {
        match self.state {
            ClockState::Running { .. } | ClockState::Expired { .. } => {
                Some(ClockToken(self.generation))
            }
            ClockState::Idle | ClockState::Completed => None,
        }
    }

    /// Begins a full countdown, invalidating any earlier token.
    #[instrument(skip(self), fields(previous = self.generation))]
    pub fn start(&mut self) -> ClockToken {
        self.generation += 1;
        self.state = ClockState::Running {
            remaining: self.config.turn_ticks,
        };
        debug!(generation = self.generation, "Countdown started");
        ClockToken(self.generation)
    }

    /// Stops the countdown after an accepted move.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn cancel(&mut self) {
        self.generation += 1;
        if self.state != ClockState::Idle {
            self.state = ClockState::Completed;
        }
    }

    /// Returns to idle, invalidating any outstanding token.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ClockState::Idle;
    }

    /// Advances the clock by one tick.
    ///
    /// On expiry the engine's turn is forfeited through `game`. After the
    /// notice the engine is resumed and a new countdown is started, whose
    /// token is returned in [`TickOutcome::Restarted`].
    #[instrument(skip(self, game), fields(generation = self.generation, token = token.0))]
    pub fn tick<G: TurnTimeout>(&mut self, token: ClockToken, game: &mut G) -> TickOutcome {
        if token.0 != self.generation {
            debug!("Ignoring stale tick");
            return TickOutcome::Stale;
        }

        match self.state {
            ClockState::Running { remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining > 0 {
                    self.state = ClockState::Running { remaining };
                    return TickOutcome::Counted { remaining };
                }

                match game.expire_turn() {
                    Some(forfeited) => {
                        info!(?forfeited, "Turn expired");
                        self.state = ClockState::Expired {
                            notice_remaining: self.config.notice_ticks,
                        };
                        TickOutcome::Expired { forfeited }
                    }
                    None => {
                        self.reset();
                        TickOutcome::Halted
                    }
                }
            }
            ClockState::Expired { notice_remaining } => {
                let notice_remaining = notice_remaining.saturating_sub(1);
                if notice_remaining > 0 {
                    self.state = ClockState::Expired { notice_remaining };
                    return TickOutcome::Notice {
                        remaining: notice_remaining,
                    };
                }

                game.resume_turn();
                let token = self.start();
                info!(generation = token.0, "Countdown restarted after notice");
                TickOutcome::Restarted { token }
            }
            ClockState::Idle | ClockState::Completed => TickOutcome::Stale,
        }
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

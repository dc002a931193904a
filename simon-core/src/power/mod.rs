//! Idle tracking and the low-power halt path.
//!
//! There is no "play again" state: a finished or abandoned session powers
//! the outputs down and halts until a gameplay button edge wakes the board.
//! Waking is treated as a restart, so [`run`] rebuilds every piece of
//! session state from scratch after each wake.

use core::time::Duration;

use crate::board::{Beeper, Board, Indicators, Wake, WakeSource};
use crate::feedback;
use crate::game::run_session;
use crate::pattern::Symbol;
use crate::random::SymbolSource;
use crate::telemetry::{GameEvent, TelemetrySink};

/// Number of idle polls before the board powers down (~120 s).
pub const IDLE_TIMEOUT_POLLS: u16 = 2400;

/// Interval between two polls of a blocking wait.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Button lines allowed to wake the board.
pub const GAMEPLAY_LINES: [Symbol; 4] = Symbol::ALL;

/// Result of ticking an [`IdleTimer`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IdleStatus {
    Active,
    Expired,
}

/// Counts fixed-interval polls since the current wait phase began.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IdleTimer {
    polls: u16,
    limit: u16,
}

impl IdleTimer {
    /// Creates a timer that expires after [`IDLE_TIMEOUT_POLLS`] polls.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limit(IDLE_TIMEOUT_POLLS)
    }

    /// Creates a timer with a custom poll budget.
    #[must_use]
    pub const fn with_limit(limit: u16) -> Self {
        Self { polls: 0, limit }
    }

    /// Starts a new wait phase.
    pub fn reset(&mut self) {
        self.polls = 0;
    }

    /// Records one elapsed poll interval.
    ///
    /// Reports [`IdleStatus::Expired`] on the tick that first reaches the
    /// limit and on every tick after it.
    pub fn tick(&mut self) -> IdleStatus {
        self.polls = self.polls.saturating_add(1);
        if self.is_expired() {
            IdleStatus::Expired
        } else {
            IdleStatus::Active
        }
    }

    /// Polls elapsed in the current wait phase.
    #[must_use]
    pub const fn polls(&self) -> u16 {
        self.polls
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.polls >= self.limit
    }
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns off the power lamp, every indicator and the beeper.
pub fn power_down<B>(board: &mut B)
where
    B: Indicators + Beeper,
{
    board.set_power_lamp(false);
    feedback::set_indicator(board, None);
    board.silence();
}

/// Powers the outputs down and halts until a gameplay button wakes the board.
pub fn enter_low_power<B>(board: &mut B) -> Wake
where
    B: Indicators + Beeper + WakeSource,
{
    power_down(board);
    board.sleep_until_wake(&GAMEPLAY_LINES)
}

/// Plays sessions forever, halting between them.
///
/// Each wake discards the previous session entirely, including the symbol
/// generator, mirroring a processor reset. Only the board's
/// [`SeedCell`](crate::board::SeedCell) carries anything over.
pub fn run<B, R, T>(board: &mut B, telemetry: &mut T) -> !
where
    B: Board,
    R: SymbolSource + Default,
    T: TelemetrySink + ?Sized,
{
    loop {
        let _ = run_session(board, R::default(), telemetry);
        let Wake = enter_low_power(board);
        telemetry.record(GameEvent::Woke);
    }
}

//! Button sampling and the blocking waits built on top of it.
//!
//! Sampling never debounces; the waits below poll at [`POLL_INTERVAL`]
//! which is slow enough to ride over contact bounce.

use crate::board::{ButtonInputs, Clock};
use crate::pattern::{ButtonId, Symbol};
use crate::power::{IdleStatus, IdleTimer, POLL_INTERVAL};

/// Outcome of a blocking, timeout-aware wait.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WaitOutcome {
    Pressed(Symbol),
    Released,
    TimedOut,
}

/// Returns the highest-priority pressed gameplay button, if any.
pub fn sample_button<B>(inputs: &mut B) -> ButtonId
where
    B: ButtonInputs + ?Sized,
{
    Symbol::ALL
        .into_iter()
        .find(|&symbol| inputs.is_pressed(symbol))
}

/// Spins until a gameplay button goes down.
///
/// Returns the pressed symbol along with the number of empty polls, which
/// is used as seed entropy. There is no timeout here: nothing has been
/// played yet, so there is no session to abandon.
pub fn wait_for_start<B>(inputs: &mut B) -> (Symbol, u16)
where
    B: ButtonInputs + ?Sized,
{
    let mut spins: u16 = 0;
    loop {
        if let Some(symbol) = sample_button(inputs) {
            return (symbol, spins);
        }
        spins = spins.wrapping_add(1);
    }
}

/// Waits for a button press, polling every [`POLL_INTERVAL`].
///
/// The idle timer is reset on entry and ticks once per empty poll.
pub fn wait_for_press<B>(board: &mut B, idle: &mut IdleTimer) -> WaitOutcome
where
    B: ButtonInputs + Clock + ?Sized,
{
    idle.reset();
    loop {
        if let Some(symbol) = sample_button(board) {
            return WaitOutcome::Pressed(symbol);
        }
        board.delay(POLL_INTERVAL);
        if idle.tick() == IdleStatus::Expired {
            return WaitOutcome::TimedOut;
        }
    }
}

/// Waits until every gameplay button is released, polling every
/// [`POLL_INTERVAL`].
pub fn wait_for_release<B>(board: &mut B, idle: &mut IdleTimer) -> WaitOutcome
where
    B: ButtonInputs + Clock + ?Sized,
{
    idle.reset();
    while sample_button(board).is_some() {
        board.delay(POLL_INTERVAL);
        if idle.tick() == IdleStatus::Expired {
            return WaitOutcome::TimedOut;
        }
    }
    WaitOutcome::Released
}

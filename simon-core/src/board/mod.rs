//! Hardware capability traits consumed by the game.
//!
//! Oscillator, pin-direction and timer bring-up stay in the firmware crate.
//! The game only ever talks to the board through these narrow traits so the
//! same logic runs on the MCU, inside the terminal emulator, and against the
//! simulated boards used by the test suite.

use core::time::Duration;

use crate::pattern::Symbol;

/// Digital inputs for the four gameplay pushbuttons (S2..S5).
///
/// The maintenance button S1 is deliberately absent; it is handled outside
/// the game.
pub trait ButtonInputs {
    /// Returns `true` while the button bound to `symbol` is held down.
    fn is_pressed(&mut self, symbol: Symbol) -> bool;
}

/// LED outputs: one indicator per symbol plus the power/run lamp.
pub trait Indicators {
    /// Drives the LED bound to `symbol`.
    fn set_led(&mut self, symbol: Symbol, lit: bool);

    /// Drives the lamp that shows a game is in progress.
    fn set_power_lamp(&mut self, lit: bool);
}

/// Piezo output line.
pub trait Beeper {
    /// Flips the beeper output level.
    fn toggle(&mut self);

    /// Drives the beeper output low.
    fn silence(&mut self);
}

/// Blocking delays and a free-running counter.
pub trait Clock {
    /// Busy-waits for at least `duration`.
    fn delay(&mut self, duration: Duration);

    /// Samples the low byte of the free-running hardware counter.
    fn ticks(&mut self) -> u8;
}

/// A single byte of state that survives a restart.
pub trait SeedCell {
    fn load(&mut self) -> u8;

    fn store(&mut self, value: u8);
}

/// Marker returned when the board leaves low-power halt.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct Wake;

/// Low-power halt with edge wake-up.
pub trait WakeSource {
    /// Arms edge interrupts for exactly `lines`, halts, and returns once one
    /// of them fires.
    ///
    /// Implementations that perform a full processor reset on wake never
    /// return. Wake-ups from any other source must re-arm `lines` and halt
    /// again instead of returning.
    fn sleep_until_wake(&mut self, lines: &[Symbol]) -> Wake;
}

/// Everything the game needs from a board.
pub trait Board: ButtonInputs + Indicators + Beeper + Clock + SeedCell + WakeSource {}

impl<T> Board for T where T: ButtonInputs + Indicators + Beeper + Clock + SeedCell + WakeSource {}

/// Board that reports no input and ignores every output.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopBoard {
    seed: u8,
}

impl NoopBoard {
    /// Creates a new no-op board.
    pub const fn new() -> Self {
        Self { seed: 0 }
    }
}

impl ButtonInputs for NoopBoard {
    fn is_pressed(&mut self, _: Symbol) -> bool {
        false
    }
}

impl Indicators for NoopBoard {
    fn set_led(&mut self, _: Symbol, _: bool) {}

    fn set_power_lamp(&mut self, _: bool) {}
}

impl Beeper for NoopBoard {
    fn toggle(&mut self) {}

    fn silence(&mut self) {}
}

impl Clock for NoopBoard {
    fn delay(&mut self, _: Duration) {}

    fn ticks(&mut self) -> u8 {
        0
    }
}

impl SeedCell for NoopBoard {
    fn load(&mut self) -> u8 {
        self.seed
    }

    fn store(&mut self, value: u8) {
        self.seed = value;
    }
}

impl WakeSource for NoopBoard {
    fn sleep_until_wake(&mut self, _: &[Symbol]) -> Wake {
        Wake
    }
}

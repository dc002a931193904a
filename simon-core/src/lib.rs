#![no_std]

// Game logic for a four-button Simon memory game.
//
// Everything here is hardware agnostic: the firmware and the terminal
// emulator plug their own boards in through the traits in `board`, which
// keeps the rules testable on the host.

pub mod board;
pub mod buttons;
pub mod feedback;
pub mod game;
pub mod pattern;
pub mod power;
pub mod random;
pub mod telemetry;

pub use board::{Board, Wake};
pub use game::{Game, GameOutcome, Phase, run_session};
pub use pattern::{PATTERN_LENGTH, Pattern, Symbol};
pub use random::{PatternRng, SymbolSource};

//! LED and tone output.
//!
//! Tones are generated by toggling the beeper line and busy-waiting half a
//! period between toggles, so every call here blocks for the full duration
//! of the sound.

use core::{fmt, time::Duration};

use crate::board::{Beeper, Clock, Indicators};
use crate::pattern::Symbol;

pub mod jingles;

pub use jingles::{ScoreDigits, play_lose, play_start, play_win, show_score};

/// Fixed pitches available on the beeper.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Note {
    E5,
    A5,
    CSharp6,
    E6,
}

impl Note {
    /// Busy-wait between two beeper toggles.
    #[must_use]
    pub const fn half_period(self) -> Duration {
        match self {
            Note::E5 => Duration::from_micros(758),
            Note::A5 => Duration::from_micros(568),
            Note::CSharp6 => Duration::from_micros(451),
            Note::E6 => Duration::from_micros(379),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Note::E5 => "E5",
            Note::A5 => "A5",
            Note::CSharp6 => "C#6",
            Note::E6 => "E6",
        };
        f.write_str(label)
    }
}

/// A note played for a number of beeper toggles.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tone {
    pub note: Note,
    pub cycles: u16,
}

impl Tone {
    pub const fn new(note: Note, cycles: u16) -> Self {
        Self { note, cycles }
    }

    /// Total time the tone blocks the caller.
    #[must_use]
    pub const fn duration(self) -> Duration {
        self.note.half_period().saturating_mul(self.cycles as u32)
    }
}

/// Tone bound to each symbol during gameplay.
///
/// Every symbol plays for roughly a quarter second.
#[must_use]
pub const fn tone_for(symbol: Symbol) -> Tone {
    match symbol {
        Symbol::One => Tone::new(Note::E5, 379),
        Symbol::Two => Tone::new(Note::CSharp6, 568),
        Symbol::Three => Tone::new(Note::E6, 758),
        Symbol::Four => Tone::new(Note::A5, 451),
    }
}

/// Lights exactly one indicator, or none for `None`.
pub fn set_indicator<B>(board: &mut B, symbol: Option<Symbol>)
where
    B: Indicators + ?Sized,
{
    for candidate in Symbol::ALL {
        board.set_led(candidate, Some(candidate) == symbol);
    }
}

/// Toggles the beeper `cycles` times at the pitch of `note`.
pub fn play_note<B>(board: &mut B, note: Note, cycles: u16)
where
    B: Beeper + Clock + ?Sized,
{
    let half_period = note.half_period();
    for _ in 0..cycles {
        board.toggle();
        board.delay(half_period);
    }
}

pub fn play_tone<B>(board: &mut B, tone: Tone)
where
    B: Beeper + Clock + ?Sized,
{
    play_note(board, tone.note, tone.cycles);
}

/// Plays the tone bound to `symbol`.
pub fn sound<B>(board: &mut B, symbol: Symbol)
where
    B: Beeper + Clock + ?Sized,
{
    play_tone(board, tone_for(symbol));
}

/// Shows a symbol: its LED stays lit while its tone plays.
pub fn pulse<B>(board: &mut B, symbol: Symbol)
where
    B: Indicators + Beeper + Clock + ?Sized,
{
    set_indicator(board, Some(symbol));
    sound(board, symbol);
    set_indicator(board, None);
}

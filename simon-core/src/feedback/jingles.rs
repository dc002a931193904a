//! Start, win and lose effects plus the score read-out.
//!
//! Each effect is a fixed script of indicator changes and tones played back
//! in order.

use core::time::Duration;

use super::{Note, Tone, play_tone, set_indicator};
use crate::board::{Beeper, Clock, Indicators};
use crate::pattern::Symbol;

/// Time an indicator stays lit, and then dark, for one score blink.
pub const SCORE_BLINK: Duration = Duration::from_millis(500);

/// Single step in an effect script.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Cue {
    Light(Option<Symbol>),
    Play(Tone),
}

const fn light(symbol: Symbol) -> Cue {
    Cue::Light(Some(symbol))
}

const DARK: Cue = Cue::Light(None);

const fn play(note: Note, cycles: u16) -> Cue {
    Cue::Play(Tone::new(note, cycles))
}

/// Rising arpeggio played when a game starts.
pub const START_JINGLE: [Cue; 5] = [
    light(Symbol::One),
    play(Note::A5, 100),
    play(Note::CSharp6, 200),
    play(Note::E6, 100),
    DARK,
];

pub const WIN_JINGLE: [Cue; 7] = [
    light(Symbol::Three),
    play(Note::E6, 150),
    DARK,
    play(Note::CSharp6, 100),
    light(Symbol::Two),
    play(Note::A5, 50),
    DARK,
];

pub const LOSE_JINGLE: [Cue; 8] = [
    light(Symbol::Four),
    play(Note::E5, 25),
    play(Note::E6, 50),
    DARK,
    play(Note::CSharp6, 200),
    light(Symbol::One),
    play(Note::A5, 250),
    DARK,
];

/// Plays an effect script from start to finish.
pub fn play_cues<B>(board: &mut B, cues: &[Cue])
where
    B: Indicators + Beeper + Clock + ?Sized,
{
    for cue in cues {
        match *cue {
            Cue::Light(symbol) => set_indicator(board, symbol),
            Cue::Play(tone) => play_tone(board, tone),
        }
    }
}

pub fn play_start<B>(board: &mut B)
where
    B: Indicators + Beeper + Clock + ?Sized,
{
    play_cues(board, &START_JINGLE);
}

pub fn play_win<B>(board: &mut B)
where
    B: Indicators + Beeper + Clock + ?Sized,
{
    play_cues(board, &WIN_JINGLE);
}

pub fn play_lose<B>(board: &mut B)
where
    B: Indicators + Beeper + Clock + ?Sized,
{
    play_cues(board, &LOSE_JINGLE);
}

/// A score split into the blink counts shown on three indicators.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ScoreDigits {
    pub tens: u8,
    pub fives: u8,
    pub ones: u8,
}

impl ScoreDigits {
    /// Indicator used for each ten.
    pub const TENS: Symbol = Symbol::One;
    /// Indicator used for the five.
    pub const FIVES: Symbol = Symbol::Two;
    /// Indicator used for each remaining one.
    pub const ONES: Symbol = Symbol::Three;

    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        let mut remaining = score;
        let tens = remaining / 10;
        remaining -= tens * 10;
        let fives = remaining / 5;
        remaining -= fives * 5;
        Self {
            tens,
            fives,
            ones: remaining,
        }
    }

    /// Total number of blinks needed to show the score.
    #[must_use]
    pub const fn blinks(self) -> u16 {
        self.tens as u16 + self.fives as u16 + self.ones as u16
    }

    /// Reassembles the score.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.tens as u16 * 10 + self.fives as u16 * 5 + self.ones as u16
    }
}

/// Blinks the score out: tens first, then the five, then the ones.
pub fn show_score<B>(board: &mut B, score: u8)
where
    B: Indicators + Clock + ?Sized,
{
    let digits = ScoreDigits::from_score(score);
    blink(board, ScoreDigits::TENS, digits.tens);
    blink(board, ScoreDigits::FIVES, digits.fives);
    blink(board, ScoreDigits::ONES, digits.ones);
}

fn blink<B>(board: &mut B, symbol: Symbol, count: u8)
where
    B: Indicators + Clock + ?Sized,
{
    for _ in 0..count {
        set_indicator(board, Some(symbol));
        board.delay(SCORE_BLINK);
        set_indicator(board, None);
        board.delay(SCORE_BLINK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_digits_are_greedy() {
        assert_eq!(
            ScoreDigits::from_score(1),
            ScoreDigits {
                tens: 0,
                fives: 0,
                ones: 1
            }
        );
        assert_eq!(
            ScoreDigits::from_score(9),
            ScoreDigits {
                tens: 0,
                fives: 1,
                ones: 4
            }
        );
        assert_eq!(
            ScoreDigits::from_score(42),
            ScoreDigits {
                tens: 4,
                fives: 0,
                ones: 2
            }
        );
        assert_eq!(ScoreDigits::from_score(0).blinks(), 0);

        for score in 0..=42 {
            let digits = ScoreDigits::from_score(score);
            assert_eq!(digits.value(), u16::from(score));
            assert!(digits.fives <= 1);
            assert!(digits.ones <= 4);
        }
    }

    #[test]
    fn hand_built_digits_do_not_overflow() {
        let digits = ScoreDigits {
            tens: u8::MAX,
            fives: u8::MAX,
            ones: u8::MAX,
        };
        assert_eq!(digits.value(), 255 * 16);
        assert_eq!(digits.blinks(), 255 * 3);
    }

    #[derive(Default)]
    struct BlinkLog {
        lit: [u8; 4],
        current: [bool; 4],
        elapsed: Duration,
    }

    impl Indicators for BlinkLog {
        fn set_led(&mut self, symbol: Symbol, lit: bool) {
            let index = symbol.as_index();
            if lit && !self.current[index] {
                self.lit[index] += 1;
            }
            self.current[index] = lit;
        }

        fn set_power_lamp(&mut self, _: bool) {}
    }

    impl Clock for BlinkLog {
        fn delay(&mut self, duration: Duration) {
            self.elapsed += duration;
        }

        fn ticks(&mut self) -> u8 {
            0
        }
    }

    #[test]
    fn score_read_out_blinks_each_digit_indicator() {
        let mut log = BlinkLog::default();
        show_score(&mut log, 27);

        assert_eq!(log.lit, [2, 1, 2, 0]);
        assert_eq!(log.current, [false; 4]);
        assert_eq!(log.elapsed, SCORE_BLINK * 2 * 5);
    }

    #[test]
    fn effects_end_dark() {
        for script in [&START_JINGLE[..], &WIN_JINGLE[..], &LOSE_JINGLE[..]] {
            assert_eq!(script.last(), Some(&Cue::Light(None)));
        }
        assert_eq!(START_JINGLE[0], Cue::Light(Some(Symbol::One)));
        assert_eq!(LOSE_JINGLE[0], Cue::Light(Some(Symbol::Four)));
    }
}

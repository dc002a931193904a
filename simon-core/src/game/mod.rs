//! Round-by-round game state machine.
//!
//! A [`Game`] owns everything a session needs: the pattern, the playback
//! cursor, the idle timer and the symbol generator. [`Game::advance`] runs
//! exactly one phase and returns the phase that follows, so callers can
//! either drive a whole session with [`run_session`] or single-step it.
//!
//! ```text
//! AwaitStart -> Presenting <-> Listening -> Won | Lost -> PoweredDown
//!          \______________________\________________________/ (idle timeout)
//! ```

use core::{fmt, time::Duration};

use crate::board::Board;
use crate::buttons::{WaitOutcome, wait_for_press, wait_for_release, wait_for_start};
use crate::feedback::{play_lose, play_start, play_win, pulse, show_score};
use crate::pattern::Pattern;
use crate::power::{self, IdleTimer};
use crate::random::{SymbolSource, fold_seed};
use crate::telemetry::{GameEvent, TelemetrySink};

/// Pause before each new round is played back.
pub const ROUND_LEAD_IN: Duration = Duration::from_millis(1_000);
/// Dark gap after each step of the playback.
pub const PLAYBACK_GAP: Duration = Duration::from_millis(500);
/// Pause between a wrong press and the lose effect.
pub const MISMATCH_PAUSE: Duration = Duration::from_millis(500);

/// Session phases.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Waiting for the press that starts a game.
    AwaitStart,
    /// Growing the pattern and playing it back.
    Presenting,
    /// Reading the player's next repeat step.
    Listening,
    Won,
    Lost,
    /// Outputs are off; the session is over.
    PoweredDown,
}

impl Phase {
    /// Returns `true` once the session can no longer change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::PoweredDown)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Phase::AwaitStart => "await-start",
            Phase::Presenting => "presenting",
            Phase::Listening => "listening",
            Phase::Won => "won",
            Phase::Lost => "lost",
            Phase::PoweredDown => "powered-down",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a session ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameOutcome {
    Won,
    Lost { score: u8 },
    IdleTimeout { phase: Phase },
}

/// State of a single play session.
pub struct Game<R> {
    rng: R,
    pattern: Pattern,
    step: usize,
    idle: IdleTimer,
    phase: Phase,
    outcome: Option<GameOutcome>,
    seed: Option<u32>,
}

impl<R> Game<R>
where
    R: SymbolSource,
{
    /// Creates a fresh session waiting for the start press.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            pattern: Pattern::new(),
            step: 0,
            idle: IdleTimer::new(),
            phase: Phase::AwaitStart,
            outcome: None,
            seed: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The pattern generated so far.
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Length of the pattern, which doubles as the score.
    #[must_use]
    pub fn max_step(&self) -> usize {
        self.pattern.len()
    }

    /// Playback/match cursor into the pattern.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Polls elapsed in the most recent wait.
    #[must_use]
    pub const fn idle_polls(&self) -> u16 {
        self.idle.polls()
    }

    /// Seed the generator was started with, once the game has begun.
    #[must_use]
    pub const fn seed(&self) -> Option<u32> {
        self.seed
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Runs the current phase to completion and moves to the next one.
    pub fn advance<B, T>(&mut self, board: &mut B, telemetry: &mut T) -> Phase
    where
        B: Board,
        T: TelemetrySink + ?Sized,
    {
        self.phase = match self.phase {
            Phase::AwaitStart => self.start(board, telemetry),
            Phase::Presenting => self.present(board, telemetry),
            Phase::Listening => self.listen(board, telemetry),
            Phase::Won => {
                play_win(board);
                telemetry.record(GameEvent::Won);
                self.shut_down(board, telemetry, GameOutcome::Won)
            }
            Phase::Lost => {
                let score = self.score();
                play_lose(board);
                show_score(board, score);
                telemetry.record(GameEvent::Lost { score });
                self.shut_down(board, telemetry, GameOutcome::Lost { score })
            }
            Phase::PoweredDown => Phase::PoweredDown,
        };
        self.phase
    }

    fn start<B, T>(&mut self, board: &mut B, telemetry: &mut T) -> Phase
    where
        B: Board,
        T: TelemetrySink + ?Sized,
    {
        board.set_power_lamp(false);
        let (_, spins) = wait_for_start(board);
        board.set_power_lamp(true);
        play_start(board);

        if wait_for_release(board, &mut self.idle) == WaitOutcome::TimedOut {
            return self.time_out(board, telemetry, Phase::AwaitStart);
        }

        let carry = board.load();
        let timer = board.ticks();
        let seed = fold_seed(carry, timer, spins);
        board.store(carry ^ timer);
        self.rng.reseed(seed);
        self.seed = Some(seed);
        self.pattern.clear();
        self.step = 0;

        telemetry.record(GameEvent::SessionStarted { seed });
        Phase::Presenting
    }

    fn present<B, T>(&mut self, board: &mut B, telemetry: &mut T) -> Phase
    where
        B: Board,
        T: TelemetrySink + ?Sized,
    {
        board.delay(ROUND_LEAD_IN);
        if self.pattern.is_full() {
            return Phase::Won;
        }

        let next = self.rng.next_symbol();
        if self.pattern.push(next).is_err() {
            return Phase::Won;
        }

        for &symbol in self.pattern.as_slice() {
            pulse(board, symbol);
            board.delay(PLAYBACK_GAP);
        }
        self.step = 0;

        telemetry.record(GameEvent::RoundPresented {
            length: self.score(),
        });
        Phase::Listening
    }

    fn listen<B, T>(&mut self, board: &mut B, telemetry: &mut T) -> Phase
    where
        B: Board,
        T: TelemetrySink + ?Sized,
    {
        let WaitOutcome::Pressed(pressed) = wait_for_press(board, &mut self.idle) else {
            return self.time_out(board, telemetry, Phase::Listening);
        };
        pulse(board, pressed);

        let index = self.step_index();
        match self.pattern.get(self.step) {
            Some(expected) if expected == pressed => {}
            Some(expected) => {
                telemetry.record(GameEvent::Mismatch {
                    index,
                    expected,
                    pressed,
                });
                board.delay(MISMATCH_PAUSE);
                return Phase::Lost;
            }
            None => return Phase::Presenting,
        }

        telemetry.record(GameEvent::StepAccepted { index });
        self.step += 1;

        if wait_for_release(board, &mut self.idle) == WaitOutcome::TimedOut {
            return self.time_out(board, telemetry, Phase::Listening);
        }
        let sample = board.ticks();
        board.store(sample);

        if self.step == self.pattern.len() {
            Phase::Presenting
        } else {
            Phase::Listening
        }
    }

    fn time_out<B, T>(&mut self, board: &mut B, telemetry: &mut T, phase: Phase) -> Phase
    where
        B: Board,
        T: TelemetrySink + ?Sized,
    {
        telemetry.record(GameEvent::IdleTimeout { phase });
        self.shut_down(board, telemetry, GameOutcome::IdleTimeout { phase })
    }

    fn shut_down<B, T>(&mut self, board: &mut B, telemetry: &mut T, outcome: GameOutcome) -> Phase
    where
        B: Board,
        T: TelemetrySink + ?Sized,
    {
        power::power_down(board);
        self.outcome = Some(outcome);
        telemetry.record(GameEvent::PoweredDown);
        Phase::PoweredDown
    }

    fn score(&self) -> u8 {
        u8::try_from(self.pattern.len()).unwrap_or(u8::MAX)
    }

    fn step_index(&self) -> u8 {
        u8::try_from(self.step).unwrap_or(u8::MAX)
    }
}

/// Plays one session from the start press until the board powers down.
pub fn run_session<B, R, T>(board: &mut B, rng: R, telemetry: &mut T) -> Game<R>
where
    B: Board,
    R: SymbolSource,
    T: TelemetrySink + ?Sized,
{
    let mut game = Game::new(rng);
    while !game.advance(board, telemetry).is_terminal() {}
    game
}

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use simon_core::board::{Beeper, ButtonInputs, Clock, Indicators, SeedCell, WakeSource};
use simon_core::random::SymbolSource;
use simon_core::{Symbol, Wake};

/// Delays a simulated press stays down for.
const HOLD_DELAYS: u8 = 2;

/// Rising edge of an indicator.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LedOn {
    pub at: Duration,
    pub symbol: Symbol,
}

/// Board simulated on a virtual clock.
///
/// Queued presses are delivered one at a time the next time the game
/// samples the buttons. Each press is held for a couple of delays and the
/// next one is withheld until the game has sampled the buttons with
/// nothing held, so a release is never skipped over.
pub struct SimBoard {
    pub now: Duration,
    pending: VecDeque<Symbol>,
    held: Option<(Symbol, u8)>,
    stuck: Option<Symbol>,
    release_pending: bool,
    pub leds: [bool; 4],
    pub lamp: bool,
    pub lit: Vec<LedOn>,
    pub toggles: u64,
    pub beeper_high: bool,
    pub seed_cell: u8,
    pub stores: Vec<u8>,
    pub samples: Vec<u8>,
    pub wakes: u32,
}

impl SimBoard {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            pending: VecDeque::new(),
            held: None,
            stuck: None,
            release_pending: false,
            leds: [false; 4],
            lamp: false,
            lit: Vec::new(),
            toggles: 0,
            beeper_high: false,
            seed_cell: 0,
            stores: Vec::new(),
            samples: Vec::new(),
            wakes: 0,
        }
    }

    pub fn with_seed_cell(seed_cell: u8) -> Self {
        Self {
            seed_cell,
            ..Self::new()
        }
    }

    pub fn queue(&mut self, symbols: &[Symbol]) {
        self.pending.extend(symbols.iter().copied());
    }

    /// Holds `symbol` down forever.
    pub fn stick(&mut self, symbol: Symbol) {
        self.stuck = Some(symbol);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Indicator rising edges after `since`.
    pub fn lit_since(&self, since: Duration) -> impl Iterator<Item = &LedOn> + '_ {
        self.lit.iter().filter(move |event| event.at >= since)
    }

    pub fn all_dark(&self) -> bool {
        !self.lamp && self.leds == [false; 4] && !self.beeper_high
    }
}

impl ButtonInputs for SimBoard {
    fn is_pressed(&mut self, symbol: Symbol) -> bool {
        if self.stuck == Some(symbol) {
            return true;
        }
        if self.held.is_none() {
            if self.release_pending {
                // A full empty sample ends on the last line.
                if symbol == Symbol::Four {
                    self.release_pending = false;
                }
                return false;
            }
            if let Some(next) = self.pending.pop_front() {
                self.held = Some((next, HOLD_DELAYS));
            }
        }
        matches!(self.held, Some((down, _)) if down == symbol)
    }
}

impl Indicators for SimBoard {
    fn set_led(&mut self, symbol: Symbol, lit: bool) {
        let slot = &mut self.leds[symbol.as_index()];
        if lit && !*slot {
            self.lit.push(LedOn {
                at: self.now,
                symbol,
            });
        }
        *slot = lit;
    }

    fn set_power_lamp(&mut self, lit: bool) {
        self.lamp = lit;
    }
}

impl Beeper for SimBoard {
    fn toggle(&mut self) {
        self.toggles += 1;
        self.beeper_high = !self.beeper_high;
    }

    fn silence(&mut self) {
        self.beeper_high = false;
    }
}

impl Clock for SimBoard {
    fn delay(&mut self, duration: Duration) {
        self.now += duration;
        if let Some((symbol, remaining)) = self.held {
            if remaining <= 1 {
                self.held = None;
                self.release_pending = true;
            } else {
                self.held = Some((symbol, remaining - 1));
            }
        }
    }

    fn ticks(&mut self) -> u8 {
        let sample = (self.now.as_micros() >> 4).to_le_bytes()[0];
        self.samples.push(sample);
        sample
    }
}

impl SeedCell for SimBoard {
    fn load(&mut self) -> u8 {
        self.seed_cell
    }

    fn store(&mut self, value: u8) {
        self.seed_cell = value;
        self.stores.push(value);
    }
}

impl WakeSource for SimBoard {
    fn sleep_until_wake(&mut self, lines: &[Symbol]) -> Wake {
        assert_eq!(lines, &Symbol::ALL[..], "only gameplay lines may wake");
        self.wakes += 1;
        Wake
    }
}

/// Symbol source that replays a fixed script and ignores reseeding.
pub struct ScriptedSymbols {
    script: Vec<Symbol>,
    cursor: usize,
    pub reseeds: Vec<u32>,
}

impl ScriptedSymbols {
    pub fn new(script: &[Symbol]) -> Self {
        assert!(!script.is_empty());
        Self {
            script: script.to_vec(),
            cursor: 0,
            reseeds: Vec::new(),
        }
    }
}

impl SymbolSource for ScriptedSymbols {
    fn reseed(&mut self, seed: u32) {
        self.reseeds.push(seed);
    }

    fn next_symbol(&mut self) -> Symbol {
        let symbol = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        symbol
    }
}

/// Presses needed to clear rounds `1..=rounds` of `script`.
pub fn presses_for_rounds(script: &[Symbol], rounds: usize) -> Vec<Symbol> {
    let pattern: Vec<Symbol> = script.iter().copied().cycle().take(rounds).collect();
    (1..=rounds)
        .flat_map(|round| pattern[..round].to_vec())
        .collect()
}

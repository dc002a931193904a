use std::io::{self, Stdout, Write};
use std::process;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveToColumn, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use simon_core::Symbol;
use simon_core::board::{Beeper, ButtonInputs, Clock, Indicators, SeedCell, Wake, WakeSource};

/// Terminals only report key-down, so a key counts as held for this long.
const KEY_HOLD: Duration = Duration::from_millis(150);
/// How long a button sample may block waiting for a key.
const SAMPLE_WAIT: Duration = Duration::from_millis(1);
/// Sleeps shorter than this are deferred and merged with the next delay.
const MIN_SLEEP: Duration = Duration::from_millis(1);

/// Board rendered on a raw-mode terminal.
///
/// Keys `1`..`4` press S2..S5. `q`, `Esc` and `Ctrl-C` restore the terminal
/// and exit the process from whichever wait the game is blocked in.
pub struct TerminalBoard {
    out: Stdout,
    started_at: Instant,
    held: Option<(Symbol, Instant)>,
    leds: [bool; 4],
    lamp: bool,
    sounding: bool,
    sleeping: bool,
    owed: Duration,
    seed: u8,
    fault: Option<io::Error>,
}

impl TerminalBoard {
    /// Switches the terminal to raw mode and draws the initial panel.
    pub fn new(seed: u8) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, Hide)?;

        let mut board = Self {
            out,
            started_at: Instant::now(),
            held: None,
            leds: [false; 4],
            lamp: false,
            sounding: false,
            sleeping: false,
            owed: Duration::ZERO,
            seed,
            fault: None,
        };
        board.render();
        Ok(board)
    }

    /// Returns the first terminal error hit since the last call.
    pub fn take_fault(&mut self) -> io::Result<()> {
        self.fault.take().map_or(Ok(()), Err)
    }

    /// Prints a line above the panel.
    pub fn print_line(&mut self, line: &str) {
        let result = queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line),
            Print("\r\n")
        );
        self.note(result);
        self.render();
    }

    /// Restores the terminal and exits.
    pub fn quit(&mut self) -> ! {
        let _ = restore(&mut self.out);
        process::exit(0);
    }

    fn render(&mut self) {
        let panel = panel(self.lamp, self.leds, self.sounding, self.sleeping);
        let result = queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(panel)
        )
        .and_then(|()| self.out.flush());
        self.note(result);
    }

    fn note(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.fault.get_or_insert(err);
        }
    }

    /// Drains pending key events, waiting at most `timeout` for the first.
    fn pump(&mut self, timeout: Duration) {
        let mut wait = timeout;
        loop {
            match event::poll(wait) {
                Ok(true) => {}
                Ok(false) => return,
                Err(err) => {
                    self.note(Err(err));
                    return;
                }
            }
            wait = Duration::ZERO;
            match event::read() {
                Ok(Event::Key(key)) => self.on_key(key),
                Ok(_) => {}
                Err(err) => {
                    self.note(Err(err));
                    return;
                }
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char(digit) => {
                if let Some(symbol) = key_symbol(digit) {
                    self.held = Some((symbol, Instant::now()));
                }
            }
            _ => {}
        }
    }

    fn settle(&mut self) {
        if self.owed >= MIN_SLEEP {
            std::thread::sleep(self.owed);
            self.owed = Duration::ZERO;
        }
    }
}

impl Drop for TerminalBoard {
    fn drop(&mut self) {
        let _ = restore(&mut self.out);
    }
}

impl ButtonInputs for TerminalBoard {
    fn is_pressed(&mut self, symbol: Symbol) -> bool {
        self.held = self.held.filter(|(_, since)| since.elapsed() < KEY_HOLD);
        if self.held.is_none() {
            self.pump(SAMPLE_WAIT);
        }
        matches!(self.held, Some((down, _)) if down == symbol)
    }
}

impl Indicators for TerminalBoard {
    fn set_led(&mut self, symbol: Symbol, lit: bool) {
        let slot = &mut self.leds[symbol.as_index()];
        if *slot != lit || self.sounding {
            *slot = lit;
            self.sounding = false;
            self.render();
        }
    }

    fn set_power_lamp(&mut self, lit: bool) {
        if self.lamp != lit {
            self.lamp = lit;
            self.render();
        }
    }
}

impl Beeper for TerminalBoard {
    fn toggle(&mut self) {
        if !self.sounding {
            self.sounding = true;
            self.render();
        }
    }

    fn silence(&mut self) {
        if self.sounding {
            self.sounding = false;
            self.render();
        }
    }
}

impl Clock for TerminalBoard {
    fn delay(&mut self, duration: Duration) {
        self.owed += duration;
        self.settle();
    }

    fn ticks(&mut self) -> u8 {
        self.started_at.elapsed().as_nanos().to_le_bytes()[0]
    }
}

impl SeedCell for TerminalBoard {
    fn load(&mut self) -> u8 {
        self.seed
    }

    fn store(&mut self, value: u8) {
        self.seed = value;
    }
}

impl WakeSource for TerminalBoard {
    /// Blocks until one of `lines` is pressed; other keys are ignored.
    fn sleep_until_wake(&mut self, lines: &[Symbol]) -> Wake {
        self.owed = Duration::ZERO;
        self.held = None;
        self.sleeping = true;
        self.render();

        loop {
            self.pump(Duration::from_millis(100));
            if let Some((symbol, _)) = self.held {
                if lines.contains(&symbol) {
                    break;
                }
                self.held = None;
            }
            if self.fault.is_some() {
                break;
            }
        }

        // The waking key stays held, like a finger still on the button.
        self.held = self.held.map(|(symbol, _)| (symbol, Instant::now()));
        self.sleeping = false;
        self.render();
        Wake
    }
}

fn restore(out: &mut Stdout) -> io::Result<()> {
    execute!(out, Print("\r\n"), Show)?;
    terminal::disable_raw_mode()
}

const fn key_symbol(key: char) -> Option<Symbol> {
    match key {
        '1' => Some(Symbol::One),
        '2' => Some(Symbol::Two),
        '3' => Some(Symbol::Three),
        '4' => Some(Symbol::Four),
        _ => None,
    }
}

/// One-line view of the board outputs.
fn panel(lamp: bool, leds: [bool; 4], sounding: bool, sleeping: bool) -> String {
    let mut panel = String::with_capacity(64);
    panel.push_str(if lamp { "PWR ● " } else { "PWR ○ " });
    for (symbol, lit) in Symbol::ALL.into_iter().zip(leds) {
        panel.push_str(symbol.button_label());
        panel.push_str(if lit { " ● " } else { " ○ " });
    }
    if sounding {
        panel.push('♪');
    }
    if sleeping {
        panel.push_str(" zz (press 1-4 to wake, q to quit)");
    }
    panel
}

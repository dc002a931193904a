//! Pattern symbols and the append-only sequence the player has to repeat.
//!
//! Every symbol is bound to exactly one gameplay button, one LED and one
//! tone. The pattern itself is a fixed-capacity buffer so the whole session
//! lives in static memory on the target.

use core::fmt;

use heapless::Vec;

/// Total number of pattern steps the player has to match to win.
pub const PATTERN_LENGTH: usize = 42;

/// Result of a button sample; `None` when no gameplay button is down.
pub type ButtonId = Option<Symbol>;

/// One of the four gameplay symbols.
///
/// Declaration order doubles as the button sampling priority: S2 (`One`)
/// is checked before S3, S4 and S5.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Symbol {
    One,
    Two,
    Three,
    Four,
}

impl Symbol {
    /// Every symbol in button sampling priority order.
    pub const ALL: [Symbol; 4] = [Symbol::One, Symbol::Two, Symbol::Three, Symbol::Four];

    /// Numeric identifier (1..=4) as shown to the player.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Symbol::One => 1,
            Symbol::Two => 2,
            Symbol::Three => 3,
            Symbol::Four => 4,
        }
    }

    /// Zero-based index for table lookups.
    #[must_use]
    pub const fn as_index(self) -> usize {
        self.id() as usize - 1
    }

    /// Attempts to construct a [`Symbol`] from its numeric identifier.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Symbol::One),
            2 => Some(Symbol::Two),
            3 => Some(Symbol::Three),
            4 => Some(Symbol::Four),
            _ => None,
        }
    }

    /// Maps a raw generator draw onto a symbol using its two low bits.
    #[must_use]
    pub const fn from_draw(draw: u32) -> Self {
        match draw & 0b11 {
            0 => Symbol::One,
            1 => Symbol::Two,
            2 => Symbol::Three,
            _ => Symbol::Four,
        }
    }

    /// Name of the physical pushbutton wired to this symbol.
    #[must_use]
    pub const fn button_label(self) -> &'static str {
        match self {
            Symbol::One => "S2",
            Symbol::Two => "S3",
            Symbol::Three => "S4",
            Symbol::Four => "S5",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Returned when a symbol is appended to a pattern that is already full.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PatternFull;

impl fmt::Display for PatternFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern already holds {PATTERN_LENGTH} steps")
    }
}

/// Growing sequence of symbols presented to the player.
///
/// The pattern only ever grows by appending at the end; earlier steps are
/// never rewritten. Its length is both the current round length and the
/// player's score.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pattern {
    steps: Vec<Symbol, PATTERN_LENGTH>,
}

impl Pattern {
    /// Creates an empty pattern.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends the next step.
    ///
    /// # Errors
    ///
    /// Returns [`PatternFull`] once [`PATTERN_LENGTH`] steps are stored.
    pub fn push(&mut self, symbol: Symbol) -> Result<(), PatternFull> {
        self.steps.push(symbol).map_err(|_| PatternFull)
    }

    /// Returns the step at `index`, if it has been generated.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.steps.get(index).copied()
    }

    /// Number of generated steps (`maxStep`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns `true` once no further step can be appended.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.steps.is_full()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        self.steps.as_slice()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

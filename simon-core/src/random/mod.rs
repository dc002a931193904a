//! Pattern symbol generation.
//!
//! The generator is seeded once per start from the restart-surviving carry
//! byte, a timer sample and the number of spins spent waiting for the start
//! press. Play-throughs are only loosely unpredictable; that is all a toy
//! needs.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::pattern::Symbol;

/// Source of fresh pattern symbols.
pub trait SymbolSource {
    /// Restarts the sequence from `seed`.
    fn reseed(&mut self, seed: u32);

    /// Draws the next symbol.
    fn next_symbol(&mut self) -> Symbol;
}

/// Folds the start-up entropy into a generator seed.
///
/// The carry byte is mixed with the timer sample, then the start-wait spin
/// count is shifted in above it.
#[must_use]
pub const fn fold_seed(carry: u8, timer: u8, wait_spins: u16) -> u32 {
    ((wait_spins as u32) << 8) | (carry ^ timer) as u32
}

/// [`SymbolSource`] backed by a seedable `rand` generator.
#[derive(Clone, Debug)]
pub struct PatternRng<R = SmallRng> {
    rng: R,
}

impl<R> PatternRng<R>
where
    R: RngCore + SeedableRng,
{
    /// Creates a generator seeded with zero; call [`SymbolSource::reseed`]
    /// before drawing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self {
            rng: R::seed_from_u64(u64::from(seed)),
        }
    }
}

impl<R> Default for PatternRng<R>
where
    R: RngCore + SeedableRng,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SymbolSource for PatternRng<R>
where
    R: RngCore + SeedableRng,
{
    fn reseed(&mut self, seed: u32) {
        self.rng = R::seed_from_u64(u64::from(seed));
    }

    fn next_symbol(&mut self) -> Symbol {
        Symbol::from_draw(self.rng.next_u32())
    }
}

//! Injectable randomness
//!
//! The puzzle only ever needs "pick an index below n". Production code uses a
//! seeded `Pcg32`; tests script the exact picks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform index selection
pub trait RandomSource {
    /// Uniform value in `0..upper`. `upper` is never zero.
    fn pick(&mut self, upper: usize) -> usize;
}

impl RandomSource for Pcg32 {
    fn pick(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

/// Seeded production source
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of picks, cycling when exhausted.
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            cursor: 0,
        }
    }

    /// Always picks the first candidate
    pub fn first() -> Self {
        Self::new([0])
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, upper: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        value % upper
    }
}

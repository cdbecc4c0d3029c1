use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform picks for feedback phrases.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is always non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len.max(1))
    }
}

/// Reproducible picks from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len.max(1))
    }
}

/// Pick one phrase uniformly. Out-of-range indices from a source are clamped.
pub fn pick_phrase<'a>(pool: &'a [String], random: &mut dyn RandomSource) -> Option<&'a str> {
    let last = pool.len().checked_sub(1)?;
    let index = random.pick_index(pool.len()).min(last);
    pool.get(index).map(String::as_str)
}

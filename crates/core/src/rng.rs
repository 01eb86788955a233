//! RNG module - seedable random source for level generation
//!
//! Level generation only needs one thing from randomness: a uniform index in
//! `[0, max)`, which drives a Fisher-Yates shuffle. That need is expressed by
//! the [`RandomSource`] trait so callers can pass a seeded [`SimpleRng`] in
//! play and a scripted source in tests.

/// A source of uniform random indices
pub trait RandomSource {
    /// Uniform value in `[0, max)`. `max` is always at least 1.
    fn next_index(&mut self, max: usize) -> usize;

    /// Shuffle a slice using Fisher-Yates (every permutation equally likely)
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }
}

/// SplitMix64 generator
///
/// Small, fast, and with no weak low bits, so `next_range` can use the full
/// output. Not cryptographically secure.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate next random u64
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Generate random value in range [0, max) without modulo bias
    pub fn next_range(&mut self, max: u64) -> u64 {
        debug_assert!(max > 0);
        // Largest multiple of `max` that fits; values at or above it are redrawn.
        let limit = u64::MAX - u64::MAX % max;
        loop {
            let v = self.next_u64();
            if v < limit {
                return v % max;
            }
        }
    }

    /// Current internal state (feeding it back to `new` continues the sequence)
    pub fn seed(&self) -> u64 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_index(&mut self, max: usize) -> usize {
        self.next_range(max as u64) as usize
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

//! RNG module - seeded generator for food placement
//!
//! A small LCG keeps runs reproducible: the same seed and the same inputs
//! produce the same food sequence, which is what the tests and benches rely on.

/// 32-bit linear congruential generator (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// A zero seed is mapped to 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        // state = a * state + c (mod 2^32)
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Generate a value in `[0, bound)`.
    ///
    /// Uses the high bits of the state; the low bits of an LCG cycle with a
    /// short period. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }

    /// Current generator state (feeding it back into `new` resumes the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

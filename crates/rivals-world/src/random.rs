//! Uniform random source used for seeding and retaliation.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform samples in `[0, 1)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }
}

impl<R: RngCore> UniformSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Deterministic generator for a seed
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

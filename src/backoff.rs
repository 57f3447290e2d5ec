use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of backoff draws. Every draw must lie in `[1, cw_size]`.
pub trait BackoffSource {
    fn draw(&mut self, cw_size: u64) -> u64;
}

/// Uniform backoff draws from a random number generator.
pub struct RandomBackoff<R> {
    rng: R,
}

impl<R: Rng> RandomBackoff<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomBackoff<ChaCha8Rng> {
    /// Reproducible draws: two sources with the same seed yield the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> BackoffSource for RandomBackoff<R> {
    fn draw(&mut self, cw_size: u64) -> u64 {
        self.rng.gen_range(1..=cw_size.max(1))
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probability that a node reaching level `n` is promoted to level `n + 1`
pub const PROMOTION_PROBABILITY: f64 = 0.25;

/// Draws node heights from a geometric distribution truncated at `max_level`
///
/// `P(height = k) = p^k * (1 - p)` for `k < max_level`; the remaining tail
/// mass lands on `max_level` itself.
#[derive(Debug)]
pub struct LevelGenerator {
    max_level: usize,
    rng: StdRng,
}

impl LevelGenerator {
    /// Create a generator seeded from OS entropy
    pub fn new(max_level: usize) -> Self {
        Self {
            max_level,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator whose height sequence is fixed by `seed`
    pub fn with_seed(max_level: usize, seed: u64) -> Self {
        Self {
            max_level,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Draw a height in `[0, max_level]`
    pub fn draw_height(&mut self) -> usize {
        let mut height = 0;
        while height < self.max_level && self.rng.r#gen::<f64>() < PROMOTION_PROBABILITY {
            height += 1;
        }
        height
    }
}

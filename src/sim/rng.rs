//! Simulation domain: seedable random source for AI decisions.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random source owned by the simulation. Seeded so AI behavior replays
/// deterministically in tests.
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in [0, 1).
    pub fn roll(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Uniform draw in [min, max).
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.inner.random_range(min..max)
    }

    /// True with probability `chance` (clamped to [0, 1]).
    pub fn chance(&mut self, chance: f32) -> bool {
        self.roll() < chance.clamp(0.0, 1.0)
    }
}

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::{Result, check_max_level, check_probability};

/// Samples node heights from a truncated geometric distribution.
///
/// Starting at level 0, each draw below `promotion_probability` promotes the
/// node one level further, up to `max_level`. The random source is owned by the
/// generator so tests can hand in a seeded one.
#[derive(Debug, Clone)]
pub struct LevelGenerator<R = StdRng> {
    max_level: usize,
    p: f64,
    rng: R,
}

impl LevelGenerator<StdRng> {
    pub fn new(max_level: usize, p: f64) -> Result<Self> {
        Self::with_rng(max_level, p, StdRng::from_os_rng())
    }

    pub fn with_seed(max_level: usize, p: f64, seed: u64) -> Result<Self> {
        Self::with_rng(max_level, p, StdRng::seed_from_u64(seed))
    }
}

impl<R> LevelGenerator<R>
where
    R: Rng,
{
    pub fn with_rng(max_level: usize, p: f64, rng: R) -> Result<Self> {
        check_max_level(max_level)?;
        check_probability(p)?;
        Ok(Self { max_level, p, rng })
    }

    // [0, max_level]
    pub fn random_level(&mut self) -> usize {
        let mut level = 0;
        while level < self.max_level && self.rng.random::<f64>() < self.p {
            level += 1;
        }
        level
    }
}

impl<R> LevelGenerator<R> {
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn probability(&self) -> f64 {
        self.p
    }
}

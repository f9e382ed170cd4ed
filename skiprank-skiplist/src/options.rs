use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{comparator::prelude::*, error::Result, level::LevelGenerator, skip_list::SkipList};

pub const DEFAULT_MAX_LEVEL: usize = 10;

pub const DEFAULT_PROMOTION_PROBABILITY: f64 = 0.5;

/// Construction parameters for a [`SkipList`], validated on `build`.
#[derive(Debug, Clone)]
pub struct SkipListOptions {
    max_level: usize,

    promotion_probability: f64,

    seed: Option<u64>,
}

impl Default for SkipListOptions {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            promotion_probability: DEFAULT_PROMOTION_PROBABILITY,
            seed: None,
        }
    }
}

impl SkipListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound on any node's height
    pub fn max_level(&mut self, max_level: usize) -> &mut Self {
        self.max_level = max_level;
        self
    }

    /// Chance of raising a node one more level; higher means taller nodes
    pub fn promotion_probability(&mut self, p: f64) -> &mut Self {
        self.promotion_probability = p;
        self
    }

    /// Seed for the height sampler, for reproducible layouts
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn build<K, V>(&self) -> Result<SkipList<K, V>>
    where
        K: Ord,
    {
        self.build_with(DefaultComparator::default(), self.rng())
    }

    /// Builds a list ordered by `c`, heights drawn from the configured seed.
    pub fn build_by<K, V, C>(&self, c: C) -> Result<SkipList<K, V, C>>
    where
        C: Comparator<Item = K>,
    {
        self.build_with(c, self.rng())
    }

    /// Builds a list ordered by `c` whose heights are drawn from `rng`. The
    /// configured seed is ignored.
    pub fn build_with<K, V, C, R>(&self, c: C, rng: R) -> Result<SkipList<K, V, C, R>>
    where
        C: Comparator<Item = K>,
        R: Rng,
    {
        let levels = LevelGenerator::with_rng(self.max_level, self.promotion_probability, rng)?;
        tracing::debug!(
            max_level = self.max_level,
            promotion_probability = self.promotion_probability,
            seeded = self.seed.is_some(),
            "build skip list"
        );
        Ok(SkipList::with_parts(c, levels))
    }
}

use skiprank_skiplist::prelude::{
    DEFAULT_MAX_LEVEL, DEFAULT_PROMOTION_PROBABILITY, SkipListOptions,
};

/// Shape of the skip list a [`Ranker`](crate::ranking::Ranker) builds for each
/// ranking.
#[derive(Debug, Clone)]
pub struct RankOptions {
    max_level: usize,

    promotion_probability: f64,

    seed: Option<u64>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            promotion_probability: DEFAULT_PROMOTION_PROBABILITY,
            seed: None,
        }
    }
}

impl RankOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_level(&mut self, max_level: usize) -> &mut Self {
        self.max_level = max_level;
        self
    }

    pub fn promotion_probability(&mut self, p: f64) -> &mut Self {
        self.promotion_probability = p;
        self
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn skip_list_options(&self) -> SkipListOptions {
        let mut opts = SkipListOptions::new();
        opts.max_level(self.max_level)
            .promotion_probability(self.promotion_probability);
        if let Some(seed) = self.seed {
            opts.seed(seed);
        }
        opts
    }
}

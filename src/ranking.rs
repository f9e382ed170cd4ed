use std::fmt;

use skiprank_skiplist::prelude::*;

use crate::{
    error::{Error, Result},
    options::RankOptions,
};

/// Ranks `(key, value)` pairs by key through a freshly built skip list.
///
/// Pairs sharing a key collapse into one entry holding the value seen last.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    options: RankOptions,
}

impl Ranker {
    pub fn new(options: RankOptions) -> Self {
        Self { options }
    }

    /// The pair with the largest key.
    pub fn top_one<K, V, I>(&self, pairs: I) -> Result<(K, V)>
    where
        K: Ord + Clone + fmt::Debug,
        V: Clone,
        I: IntoIterator<Item = (K, V)>,
    {
        let list = self.collect(pairs)?;
        let top = list
            .level_nodes(0)
            .last()
            .map(|node| (node.key().clone(), node.value().clone()))
            .ok_or(Error::EmptyInput)?;
        tracing::debug!(ranked = list.len(), top = ?top.0, "pick top one");
        Ok(top)
    }

    /// Up to `n` pairs with the largest keys, largest first.
    pub fn top_n<K, V, I>(&self, pairs: I, n: usize) -> Result<Vec<(K, V)>>
    where
        K: Ord + Clone,
        V: Clone,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut list = self
            .options
            .skip_list_options()
            .build_by(ReverseComparator(DefaultComparator::default()))?;
        list.extend(pairs);
        if list.is_empty() {
            return Err(Error::EmptyInput);
        }
        tracing::debug!(ranked = list.len(), n, "pick top n");
        Ok(list
            .iter()
            .take(n)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    /// Every distinct key in ascending order.
    pub fn rank<K, V, I>(&self, pairs: I) -> Result<Vec<(K, V)>>
    where
        K: Ord + Clone,
        V: Clone,
        I: IntoIterator<Item = (K, V)>,
    {
        let list = self.collect(pairs)?;
        if list.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(list.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    fn collect<K, V, I>(&self, pairs: I) -> Result<SkipList<K, V>>
    where
        K: Ord,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut list = self.options.skip_list_options().build()?;
        list.extend(pairs);
        Ok(list)
    }
}

/// [`Ranker::top_one`] with the default options.
pub fn top_one<K, V, I>(pairs: I) -> Result<(K, V)>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone,
    I: IntoIterator<Item = (K, V)>,
{
    Ranker::default().top_one(pairs)
}

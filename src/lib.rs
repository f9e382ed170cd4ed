mod options;

#[cfg(test)]
mod test_utils;

pub mod error;
pub mod ranking;

pub use options::RankOptions;
pub use skiprank_skiplist::prelude as skiplist;

mod comparator;
mod error;
mod level;
mod options;
mod skip_list;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::comparator::prelude::*;
    pub use crate::error::{Error, Result};
    pub use crate::level::LevelGenerator;
    pub use crate::options::{DEFAULT_MAX_LEVEL, DEFAULT_PROMOTION_PROBABILITY, SkipListOptions};
    pub use crate::skip_list::{Iter, Level, Node, SkipList};
}

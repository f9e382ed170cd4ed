use std::cmp;

mod default_comparator;
mod reverse_comparator;

pub mod prelude {
    #![allow(unused)]

    pub use super::Comparator;
    pub use super::default_comparator::DefaultComparator;
    pub use super::reverse_comparator::ReverseComparator;
}

/// Total order over the keys stored in a [`SkipList`](crate::skip_list::SkipList).
pub trait Comparator {
    type Item;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> cmp::Ordering;
}

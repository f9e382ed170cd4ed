use std::cmp;

use super::Comparator;

/// Inverts the order of the wrapped comparator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReverseComparator<C>(pub C);

impl<C> Comparator for ReverseComparator<C>
where
    C: Comparator,
{
    type Item = C::Item;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> cmp::Ordering {
        self.0.compare(a, b).reverse()
    }
}

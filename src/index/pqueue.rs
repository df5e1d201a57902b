use std::cmp::Ordering;

/// Heap entry ordered by score, then by item
///
/// `f32::total_cmp` gives a total order (NaN sorts above every number), and
/// the item breaks ties so the heap's order never depends on insertion order.
#[derive(Debug, Clone)]
pub struct ScoredItem<T> {
    pub score: f32,
    pub item: T,
}

impl<T: Ord> PartialEq for ScoredItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for ScoredItem<T> {}

impl<T: Ord> PartialOrd for ScoredItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for ScoredItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.item.cmp(&other.item))
    }
}

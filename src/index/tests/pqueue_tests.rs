use crate::index::pqueue::ScoredItem;
use std::collections::BinaryHeap;
use std::cmp::Reverse;

#[test]
fn test_push_pop_ordering() {
    let mut heap = BinaryHeap::new();
    heap.push(ScoredItem { score: 1.0, item: 1 });
    heap.push(ScoredItem { score: 3.0, item: 3 });
    heap.push(ScoredItem { score: 2.0, item: 2 });

    // Max heap: largest score first
    assert_eq!(heap.pop().unwrap().item, 3);
    assert_eq!(heap.pop().unwrap().item, 2);
    assert_eq!(heap.pop().unwrap().item, 1);
}

#[test]
fn test_equal_scores_order_by_item() {
    let low = ScoredItem { score: 0.5, item: 1u32 };
    let high = ScoredItem { score: 0.5, item: 7u32 };
    assert!(low < high);

    let mut heap = BinaryHeap::new();
    heap.push(low);
    heap.push(high);
    // Higher handle is "worse" and surfaces first for eviction
    assert_eq!(heap.peek().unwrap().item, 7);
}

#[test]
fn test_nan_sorts_above_numbers() {
    let nan = ScoredItem { score: f32::NAN, item: 0u32 };
    let inf = ScoredItem { score: f32::INFINITY, item: 1u32 };
    assert!(nan > inf);
}

#[test]
fn test_min_heap_with_reverse() {
    let mut min_heap = BinaryHeap::new();
    min_heap.push(Reverse(ScoredItem { score: 1.0, item: 1 }));
    min_heap.push(Reverse(ScoredItem { score: 2.0, item: 2 }));

    assert_eq!(min_heap.peek().unwrap().0.score, 1.0);
}

#[test]
fn test_sorted_vec_ascending() {
    let heap: BinaryHeap<_> = [(0.9, 2u32), (0.1, 5), (0.1, 3), (0.4, 0)]
        .into_iter()
        .map(|(score, item)| ScoredItem { score, item })
        .collect();

    let items: Vec<u32> = heap.into_sorted_vec().into_iter().map(|s| s.item).collect();
    assert_eq!(items, vec![3, 5, 0, 2]);
}

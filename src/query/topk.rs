use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::core::types::DocId;

/// Fixed capacity for query results (§4.11, §6 top-10).
pub const DEFAULT_CAPACITY: usize = 10;

/// One ranked result. Ordered by `(score, doc-id)` ascending — equal
/// scores break ties toward the higher doc-id (§4.11).
#[derive(Debug, Clone, Copy)]
pub struct ScoredDoc {
    pub score: f64,
    pub doc_id: DocId,
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.total_cmp(&other.score).then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// C11: a fixed-capacity max-of-bottom priority structure, implemented
/// as a min-heap over the current top-K so both insertion and eviction
/// touch only the smallest element.
pub struct BoundedTopK {
    capacity: usize,
    heap: BinaryHeap<Reverse<ScoredDoc>>,
}

impl BoundedTopK {
    pub fn new(capacity: usize) -> Self {
        BoundedTopK {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// If under capacity, push. Otherwise replace the current minimum
    /// with `entry` iff `entry`'s key is greater, returning the
    /// displaced element (§4.11).
    pub fn insert(&mut self, entry: ScoredDoc) -> Option<ScoredDoc> {
        if self.capacity == 0 {
            return None;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(entry));
            return None;
        }

        let current_min = self.heap.peek().map(|Reverse(e)| *e).expect("capacity > 0 implies non-empty heap once full");
        if entry > current_min {
            self.heap.pop();
            self.heap.push(Reverse(entry));
            Some(current_min)
        } else {
            None
        }
    }

    /// Entries in descending key order.
    pub fn into_sorted_vec(self) -> Vec<ScoredDoc> {
        let mut results: Vec<ScoredDoc> = self.heap.into_iter().map(|Reverse(e)| e).collect();
        results.sort_by(|a, b| b.cmp(a));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(score: f64, id: u32) -> ScoredDoc {
        ScoredDoc { score, doc_id: DocId::new(id) }
    }

    #[test]
    fn keeps_only_the_top_k_by_score() {
        let mut top_k = BoundedTopK::new(2);
        assert!(top_k.insert(doc(1.0, 0)).is_none());
        assert!(top_k.insert(doc(3.0, 1)).is_none());
        let displaced = top_k.insert(doc(2.0, 2));
        assert_eq!(displaced.unwrap().doc_id, DocId::new(0));

        let results = top_k.into_sorted_vec();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].doc_id, DocId::new(1));
        assert_eq!(results[1].doc_id, DocId::new(2));
    }

    #[test]
    fn ties_break_toward_higher_doc_id() {
        let mut top_k = BoundedTopK::new(1);
        top_k.insert(doc(1.0, 5));
        let displaced = top_k.insert(doc(1.0, 9));
        assert_eq!(displaced.unwrap().doc_id, DocId::new(5));
    }
}

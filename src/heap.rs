//! A priority queue of predicted pairwise collision times with lazy
//! invalidation: pushing a new prediction for a pair supersedes whatever
//! was scheduled for that pair before, without having to touch the heap
//! itself until the superseded entry is eventually popped.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use slotmap::Key as _;
use tracing::trace;

use crate::universe::BodyKey;

/// An unordered pair of body keys, canonicalized so that `(a, b)` and
/// `(b, a)` hash and compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyPair(BodyKey, BodyKey);

impl BodyPair {
    pub fn new(a: BodyKey, b: BodyKey) -> BodyPair {
        if a.data().as_ffi() <= b.data().as_ffi() {
            BodyPair(a, b)
        } else {
            BodyPair(b, a)
        }
    }

    pub fn keys(&self) -> (BodyKey, BodyKey) {
        (self.0, self.1)
    }
}

/// A single arena-allocated heap entry. The same entry is referenced both
/// by the heap's internal ordering and by `CollisionHeap::by_pair`; voiding
/// it flips one shared flag rather than trying to keep two copies in sync.
struct Entry {
    t: f64,
    pair: BodyPair,
    void: bool,
}

/// Orders entries in the backing `BinaryHeap` by ascending `t` (via
/// `Reverse`-free min-heap emulation: we store `HeapRef` so that
/// `BinaryHeap`, which is a max-heap, pops the smallest `t` first).
struct HeapRef {
    t: f64,
    idx: usize,
}

impl PartialEq for HeapRef {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t
    }
}
impl Eq for HeapRef {}
impl PartialOrd for HeapRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) yields the smallest `t` first.
        other
            .t
            .partial_cmp(&self.t)
            .unwrap_or(Ordering::Equal)
    }
}

/// Compact when the fraction of voided entries exceeds this threshold, per
/// the resource-model guidance against unbounded heap growth under churn.
pub const COMPACTION_VOID_RATIO: f64 = 0.5;

/// Priority queue of predicted pairwise collision events, keyed by
/// `predicted_t` ascending, with lazy invalidation by pair.
#[derive(Default)]
pub struct CollisionHeap {
    entries: Vec<Entry>,
    heap: BinaryHeap<HeapRef>,
    by_pair: HashMap<BodyPair, usize>,
    void_count: usize,
}

impl CollisionHeap {
    pub fn new() -> CollisionHeap {
        CollisionHeap::default()
    }

    /// Pushes a fresh prediction for `(k1, k2)`. If a live entry already
    /// exists for this pair it is voided first, so at most one live entry
    /// per pair exists at any time. A `predicted_t` of `+inf` means the
    /// pair will never collide given current trajectories and is not
    /// stored at all.
    pub fn push(&mut self, k1: BodyKey, k2: BodyKey, predicted_t: f64) {
        let pair = BodyPair::new(k1, k2);
        if let Some(&idx) = self.by_pair.get(&pair) {
            self.entries[idx].void = true;
            self.void_count += 1;
            self.by_pair.remove(&pair);
        }

        if predicted_t.is_finite() {
            let idx = self.entries.len();
            self.entries.push(Entry {
                t: predicted_t,
                pair,
                void: false,
            });
            self.by_pair.insert(pair, idx);
            self.heap.push(HeapRef { t: predicted_t, idx });
        }

        trace!(?pair, predicted_t, "pushed collision prediction");

        if self.void_count as f64 > self.entries.len() as f64 * COMPACTION_VOID_RATIO {
            self.compact();
        }
    }

    /// The next live event's time, or `+inf` if the heap is empty.
    pub fn peek(&mut self) -> f64 {
        self.drop_voided_top();
        self.heap.peek().map_or(f64::INFINITY, |top| top.t)
    }

    /// Pops and returns the next live event, or `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<(f64, BodyKey, BodyKey)> {
        self.drop_voided_top();
        let top = self.heap.pop()?;
        let entry = &self.entries[top.idx];
        self.by_pair.remove(&entry.pair);
        let (k1, k2) = entry.pair.keys();
        Some((entry.t, k1, k2))
    }

    /// Number of live entries currently scheduled.
    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }

    pub fn contains(&self, k1: BodyKey, k2: BodyKey) -> bool {
        self.by_pair.contains_key(&BodyPair::new(k1, k2))
    }

    fn drop_voided_top(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.entries[top.idx].void {
                self.void_count -= 1;
                self.heap.pop();
            } else {
                break;
            }
        }
    }

    /// Rebuilds the arena and heap, dropping every voided entry. Keeps the
    /// void ratio bounded under sustained churn (see the resource model).
    fn compact(&mut self) {
        let live: Vec<(f64, BodyPair)> = self
            .entries
            .drain(..)
            .filter(|e| !e.void)
            .map(|e| (e.t, e.pair))
            .collect();

        self.heap.clear();
        self.by_pair.clear();
        self.void_count = 0;

        for (t, pair) in live {
            let idx = self.entries.len();
            self.entries.push(Entry { t, pair, void: false });
            self.by_pair.insert(pair, idx);
            self.heap.push(HeapRef { t, idx });
        }

        trace!(entries = self.entries.len(), "compacted collision heap");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::Universe;
    use crate::body::Body;

    fn two_keys() -> (BodyKey, BodyKey, BodyKey) {
        let mut universe = Universe::new(0.0);
        let a = universe.add(Body::default());
        let b = universe.add(Body::default());
        let c = universe.add(Body::default());
        (a, b, c)
    }

    #[test]
    fn push_supersedes_same_pair() {
        let (a, b, _c) = two_keys();
        let mut heap = CollisionHeap::new();
        heap.push(a, b, 5.0);
        heap.push(a, b, 3.0);
        assert_eq!(heap.peek(), 3.0);
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn push_infinite_is_not_stored() {
        let (a, b, _c) = two_keys();
        let mut heap = CollisionHeap::new();
        heap.push(a, b, f64::INFINITY);
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.peek(), f64::INFINITY);
    }

    #[test]
    fn pop_returns_events_in_ascending_order() {
        let (a, b, c) = two_keys();
        let mut heap = CollisionHeap::new();
        heap.push(a, b, 5.0);
        heap.push(a, c, 1.0);
        heap.push(b, c, 3.0);

        let (t1, ..) = heap.pop().unwrap();
        let (t2, ..) = heap.pop().unwrap();
        let (t3, ..) = heap.pop().unwrap();
        assert!(t1 <= t2 && t2 <= t3);
        assert_eq!((t1, t2, t3), (1.0, 3.0, 5.0));
    }

    #[test]
    fn pop_skips_voided_entries() {
        let (a, b, _c) = two_keys();
        let mut heap = CollisionHeap::new();
        heap.push(a, b, 1.0);
        heap.push(a, b, 9.0);
        let (t, ..) = heap.pop().unwrap();
        assert_eq!(t, 9.0);
        assert!(heap.pop().is_none());
    }

    #[test]
    fn contains_reflects_live_entries_only() {
        let (a, b, _c) = two_keys();
        let mut heap = CollisionHeap::new();
        assert!(!heap.contains(a, b));
        heap.push(a, b, 2.0);
        assert!(heap.contains(a, b));
        assert!(heap.contains(b, a));
        heap.pop();
        assert!(!heap.contains(a, b));
    }
}

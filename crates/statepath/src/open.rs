use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::pool::StateId;

/// Frontier entry, ordered by `f` and then by insertion order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenEntry {
    pub(crate) id: StateId,
    pub(crate) f: f32,
    pub(crate) seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max-heap) pops the smallest f, oldest first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier with deterministic tie-breaking.
///
/// Lowering the priority of a state already in the set is done by pushing it
/// again: the caller stores the returned sequence number on the state and
/// discards popped entries whose number no longer matches.
#[derive(Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    next_seq: u64,
}

impl OpenSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert `id` with priority `f` and return the entry's sequence number.
    pub(crate) fn push(&mut self, id: StateId, f: f32) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(OpenEntry { id, f, seq });
        seq
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }

    /// Drop every entry. Sequence numbers keep increasing so that entries
    /// from an earlier search can never match a live record.
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

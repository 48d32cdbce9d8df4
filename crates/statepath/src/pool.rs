use std::ops::{Index, IndexMut};

use crate::error::SolveError;

/// Generation-tagged handle to a record in a [`StatePool`].
///
/// Handles issued before the last [`StatePool::reset`] resolve to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct StateId {
    index: u32,
    generation: u32,
}

/// A finite-cost edge cached on the record of its source state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub(crate) to: StateId,
    pub(crate) cost: f32,
}

/// Per-state bookkeeping.
///
/// `node` and `edges` survive across searches until the pool is reset. The
/// remaining fields belong to the search identified by `frame` and are
/// re-initialised lazily when a newer search first touches the record.
#[derive(Debug, Clone)]
pub(crate) struct StateRecord<N> {
    pub(crate) node: N,
    pub(crate) edges: Option<Vec<Edge>>,
    pub(crate) frame: u32,
    /// Cost from the start of the search.
    pub(crate) g: f32,
    /// Estimate to the goal of the search.
    pub(crate) h: f32,
    pub(crate) parent: Option<StateId>,
    pub(crate) open: bool,
    pub(crate) closed: bool,
    /// Sequence number of the live open-set entry for this record.
    pub(crate) seq: u64,
}

impl<N> StateRecord<N> {
    pub(crate) fn new(node: N) -> Self {
        Self {
            node,
            edges: None,
            frame: 0,
            g: f32::INFINITY,
            h: 0.0,
            parent: None,
            open: false,
            closed: false,
            seq: 0,
        }
    }

    /// Prepare the per-search fields for search `frame`.
    #[inline]
    pub(crate) fn touch(&mut self, frame: u32, h: f32) {
        self.frame = frame;
        self.g = f32::INFINITY;
        self.h = h;
        self.parent = None;
        self.open = false;
        self.closed = false;
    }

    #[inline]
    pub(crate) fn f(&self) -> f32 {
        self.g + self.h
    }
}

/// Arena of [`StateRecord`]s grown in fixed-size blocks up to a hard ceiling.
///
/// Every block is allocated with exactly `block_size` capacity and never
/// pushed beyond it, so records do not move once issued.
pub(crate) struct StatePool<N> {
    blocks: Vec<Vec<StateRecord<N>>>,
    block_size: usize,
    max_blocks: usize,
    len: usize,
    generation: u32,
}

impl<N> StatePool<N> {
    /// Create an empty pool. Both parameters are clamped to at least 1.
    pub(crate) fn new(block_size: usize, max_blocks: usize) -> Self {
        let block_size = block_size.clamp(1, u32::MAX as usize);
        Self {
            blocks: vec![Vec::with_capacity(block_size)],
            block_size,
            max_blocks: max_blocks.max(1),
            len: 0,
            generation: 0,
        }
    }

    /// Store `record`, adding a block if the current ones are full.
    pub(crate) fn allocate(&mut self, record: StateRecord<N>) -> Result<StateId, SolveError> {
        let block = self.len / self.block_size;
        if block == self.blocks.len() {
            if self.blocks.len() >= self.max_blocks || self.len >= u32::MAX as usize {
                return Err(SolveError::OutOfMemory {
                    capacity: self.capacity(),
                });
            }
            self.blocks.push(Vec::with_capacity(self.block_size));
        }
        self.blocks[block].push(record);
        let id = StateId {
            index: self.len as u32,
            generation: self.generation,
        };
        self.len += 1;
        Ok(id)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, id: StateId) -> Option<&StateRecord<N>> {
        if id.generation != self.generation {
            return None;
        }
        let i = id.index as usize;
        self.blocks.get(i / self.block_size)?.get(i % self.block_size)
    }

    /// Release every record. Handles issued so far become stale; the first
    /// block's storage is kept for reuse.
    pub(crate) fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.blocks.truncate(1);
        if let Some(first) = self.blocks.first_mut() {
            first.clear();
        }
        self.len = 0;
    }

    /// Change the block ceiling. Blocks already in use are kept even if the
    /// new ceiling is lower; only further growth is refused.
    pub(crate) fn set_max_blocks(&mut self, max_blocks: usize) {
        self.max_blocks = max_blocks.max(1);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &StateRecord<N>> {
        self.blocks.iter().flatten()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StateRecord<N>> {
        self.blocks.iter_mut().flatten()
    }

    /// Number of live records.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of records the pool may hold.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.block_size.saturating_mul(self.max_blocks)
    }

    #[inline]
    pub(crate) fn blocks(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub(crate) fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub(crate) fn max_blocks(&self) -> usize {
        self.max_blocks
    }
}

impl<N> Index<StateId> for StatePool<N> {
    type Output = StateRecord<N>;

    #[inline]
    fn index(&self, id: StateId) -> &StateRecord<N> {
        debug_assert_eq!(id.generation, self.generation, "stale state handle");
        let i = id.index as usize;
        &self.blocks[i / self.block_size][i % self.block_size]
    }
}

impl<N> IndexMut<StateId> for StatePool<N> {
    #[inline]
    fn index_mut(&mut self, id: StateId) -> &mut StateRecord<N> {
        debug_assert_eq!(id.generation, self.generation, "stale state handle");
        let i = id.index as usize;
        &mut self.blocks[i / self.block_size][i % self.block_size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_block_by_block() {
        let mut pool = StatePool::new(3, 4);
        for i in 0..7 {
            pool.allocate(StateRecord::new(i)).unwrap();
        }
        assert_eq!(pool.len(), 7);
        assert_eq!(pool.blocks(), 3);
        assert_eq!(pool.capacity(), 12);
    }

    #[test]
    fn records_do_not_move() {
        let mut pool = StatePool::new(2, 8);
        let first = pool.allocate(StateRecord::new(10)).unwrap();
        let addr = pool.get(first).unwrap() as *const StateRecord<i32>;
        for i in 0..10 {
            pool.allocate(StateRecord::new(i)).unwrap();
        }
        assert_eq!(pool.get(first).unwrap() as *const StateRecord<i32>, addr);
        assert_eq!(pool.get(first).unwrap().node, 10);
    }

    #[test]
    fn ceiling_is_enforced() {
        let mut pool = StatePool::new(2, 2);
        for i in 0..4 {
            pool.allocate(StateRecord::new(i)).unwrap();
        }
        let err = pool.allocate(StateRecord::new(4)).unwrap_err();
        assert_eq!(err, SolveError::OutOfMemory { capacity: 4 });
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.blocks(), 2);

        pool.set_max_blocks(3);
        assert!(pool.allocate(StateRecord::new(4)).is_ok());
    }

    #[test]
    fn reset_invalidates_handles() {
        let mut pool = StatePool::new(4, 4);
        let id = pool.allocate(StateRecord::new('a')).unwrap();
        for c in ['b', 'c', 'd', 'e', 'f'] {
            pool.allocate(StateRecord::new(c)).unwrap();
        }
        pool.reset();
        assert!(pool.get(id).is_none());
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.blocks(), 1);

        let fresh = pool.allocate(StateRecord::new('z')).unwrap();
        assert_ne!(fresh, id);
        assert_eq!(pool.get(fresh).unwrap().node, 'z');
        assert!(pool.get(id).is_none());
    }

    #[test]
    fn zero_sizes_are_clamped() {
        let mut pool = StatePool::new(0, 0);
        assert_eq!(pool.capacity(), 1);
        assert!(pool.allocate(StateRecord::new(())).is_ok());
        assert!(pool.allocate(StateRecord::new(())).is_err());
    }
}

use std::collections::HashMap;
use std::hash::Hash;

use crate::pool::StateId;

/// Index from caller node identities to pool records.
///
/// Valid until the owning solver is reset; entries are never removed
/// individually.
pub(crate) struct StateCache<N> {
    map: HashMap<N, StateId>,
}

impl<N: Copy + Eq + Hash> StateCache<N> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn get(&self, node: N) -> Option<StateId> {
        self.map.get(&node).copied()
    }

    #[inline]
    pub(crate) fn insert(&mut self, node: N, id: StateId) {
        self.map.insert(node, id);
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{StatePool, StateRecord};

    #[test]
    fn maps_nodes_to_records() {
        let mut pool = StatePool::new(4, 4);
        let mut cache = StateCache::with_capacity(4);
        for node in [7u32, 3, 11] {
            let id = pool.allocate(StateRecord::new(node)).unwrap();
            cache.insert(node, id);
        }
        assert_eq!(cache.len(), 3);
        let id = cache.get(3).unwrap();
        assert_eq!(pool.get(id).unwrap().node, 3);
        assert!(cache.get(4).is_none());

        cache.insert(3, id);
        assert_eq!(cache.len(), 3);

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.get(7).is_none());
    }
}

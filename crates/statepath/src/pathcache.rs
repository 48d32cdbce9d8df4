use std::collections::HashMap;
use std::hash::Hash;

/// Usage figures for the solved-path cache.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheData {
    /// Entries currently stored.
    pub entries: usize,
    /// Maximum number of entries.
    pub capacity: usize,
    /// `entries / capacity`.
    pub memory_fraction: f32,
    pub hits: u64,
    pub misses: u64,
    /// `hits / (hits + misses)`, or 0 when the cache was never consulted.
    pub hit_fraction: f32,
}

#[derive(Debug, Clone, Copy)]
enum Entry<N> {
    Next { next: N, cost: f32 },
    NoSolution,
}

pub(crate) enum CacheLookup {
    Solved(f32),
    NoSolution,
    Miss,
}

/// Memo of finished searches, keyed by `(node, goal)`.
///
/// A solved path stores, for every node on it, the next step towards the
/// goal and the remaining cost. A failed search stores a negative answer for
/// every state it reached: anything reachable from a start that cannot reach
/// the goal cannot reach it either.
pub(crate) struct PathCache<N> {
    map: HashMap<(N, N), Entry<N>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<N: Copy + Eq + Hash> PathCache<N> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::new(),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Rebuild the path `start..=goal` into `path` if it was cached.
    pub(crate) fn lookup(&mut self, start: N, goal: N, path: &mut Vec<N>) -> CacheLookup {
        path.clear();
        let cost = match self.map.get(&(start, goal)) {
            None => {
                self.misses += 1;
                return CacheLookup::Miss;
            }
            Some(Entry::NoSolution) => {
                self.hits += 1;
                return CacheLookup::NoSolution;
            }
            Some(Entry::Next { cost, .. }) => *cost,
        };

        path.push(start);
        let mut cur = start;
        while cur != goal {
            match self.map.get(&(cur, goal)) {
                Some(Entry::Next { next, .. }) if path.len() <= self.map.len() => {
                    cur = *next;
                    path.push(cur);
                }
                _ => {
                    path.clear();
                    self.misses += 1;
                    return CacheLookup::Miss;
                }
            }
        }
        self.hits += 1;
        CacheLookup::Solved(cost)
    }

    /// Record a solved path. `g[i]` is the cost from `path[0]` to `path[i]`
    /// and the last element of `g` the total cost.
    pub(crate) fn add_path(&mut self, path: &[N], g: &[f32]) {
        debug_assert_eq!(path.len(), g.len());
        let (Some(&goal), Some(&total)) = (path.last(), g.last()) else {
            return;
        };
        if self.map.len() + path.len() > self.capacity {
            return;
        }
        for (step, cost_so_far) in path.windows(2).zip(g) {
            self.map.insert(
                (step[0], goal),
                Entry::Next {
                    next: step[1],
                    cost: total - cost_so_far,
                },
            );
        }
    }

    /// Record that none of `states` can reach `goal`.
    pub(crate) fn add_no_solution(&mut self, goal: N, states: impl ExactSizeIterator<Item = N>) {
        if self.map.len() + states.len() > self.capacity {
            return;
        }
        for s in states {
            self.map.insert((s, goal), Entry::NoSolution);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    pub(crate) fn data(&self) -> CacheData {
        let consulted = self.hits + self.misses;
        CacheData {
            entries: self.map.len(),
            capacity: self.capacity,
            memory_fraction: if self.capacity == 0 {
                0.0
            } else {
                self.map.len() as f32 / self.capacity as f32
            },
            hits: self.hits,
            misses: self.misses,
            hit_fraction: if consulted == 0 {
                0.0
            } else {
                self.hits as f32 / consulted as f32
            },
        }
    }
}

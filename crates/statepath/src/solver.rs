use crate::cache::StateCache;
use crate::config::SolverConfig;
use crate::error::{Endpoint, SolveError};
use crate::open::OpenSet;
use crate::pathcache::{CacheData, CacheLookup, PathCache};
use crate::pool::{Edge, StateId, StatePool, StateRecord};
use crate::traits::{Graph, StateCost};

/// Successful outcome of [`Solver::solve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solved {
    /// A path was found; `cost` is the sum of its edge costs.
    Path { cost: f32 },
    /// Start and end are the same node. The path is empty.
    StartEndIdentical,
}

impl Solved {
    /// Total path cost (0 for identical endpoints).
    #[inline]
    pub fn cost(self) -> f32 {
        match self {
            Self::Path { cost } => cost,
            Self::StartEndIdentical => 0.0,
        }
    }
}

/// Flat classification of a solve result, convenient for tallying outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    Solved,
    NoSolution,
    StartEndIdentical,
    OutOfMemory,
    InvalidEndpoint,
}

impl SolveStatus {
    pub fn of(result: &Result<Solved, SolveError>) -> Self {
        match result {
            Ok(Solved::Path { .. }) => Self::Solved,
            Ok(Solved::StartEndIdentical) => Self::StartEndIdentical,
            Err(SolveError::NoSolution) => Self::NoSolution,
            Err(SolveError::OutOfMemory { .. }) => Self::OutOfMemory,
            Err(SolveError::InvalidEndpoint(_)) => Self::InvalidEndpoint,
        }
    }
}

/// Where the solver stands after its last [`Solver::solve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Freshly constructed or reset.
    Idle,
    Solved,
    NoSolution,
    OutOfMemory,
}

/// Counters describing the solver's memory and work.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverStats {
    /// Searches run since construction (cache hits included, trivial
    /// identical-endpoint queries excluded).
    pub solves: u64,
    /// States expanded since construction.
    pub expansions: u64,
    /// States currently held by the pool.
    pub states: usize,
    /// Pool blocks currently allocated.
    pub blocks: usize,
    pub block_size: usize,
    pub max_blocks: usize,
    pub path_cache: CacheData,
}

/// A* solver bound to one graph.
///
/// State records, cached adjacency and solved paths persist across calls,
/// so repeated queries over an unchanged graph get cheaper. After any
/// change to the graph's costs or topology call [`reset`](Solver::reset);
/// the solver cannot detect such changes itself.
pub struct Solver<G: Graph> {
    graph: G,
    pub(crate) pool: StatePool<G::Node>,
    pub(crate) cache: StateCache<G::Node>,
    pub(crate) open: OpenSet,
    path_cache: Option<PathCache<G::Node>>,
    pub(crate) frame: u32,
    state: SolverState,
    // scratch buffers
    nbuf: Vec<StateCost<G::Node>>,
    gbuf: Vec<f32>,
    pub(crate) touched: Vec<StateId>,
    // counters
    solves: u64,
    pub(crate) expansions: u64,
}

impl<G: Graph> Solver<G> {
    /// Create a solver for `graph`.
    pub fn new(graph: G, config: SolverConfig) -> Self {
        let path_cache = config
            .path_cache
            .then(|| PathCache::new(config.path_cache_capacity));
        Self {
            graph,
            pool: StatePool::new(config.block_size, config.max_blocks),
            cache: StateCache::with_capacity(config.block_size),
            open: OpenSet::new(),
            path_cache,
            frame: 0,
            state: SolverState::Idle,
            nbuf: Vec::with_capacity(config.typical_adjacent),
            gbuf: Vec::new(),
            touched: Vec::new(),
            solves: 0,
            expansions: 0,
        }
    }

    #[inline]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable access to the graph. Call [`reset`](Solver::reset) after
    /// changing anything that affects costs or neighbors.
    #[inline]
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn into_graph(self) -> G {
        self.graph
    }

    #[inline]
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Discard every state record, cached adjacency and cached path.
    pub fn reset(&mut self) {
        log::debug!("solver reset: releasing {} states", self.cache.len());
        self.pool.reset();
        self.cache.clear();
        self.open.clear();
        self.touched.clear();
        if let Some(pc) = self.path_cache.as_mut() {
            pc.clear();
        }
        self.state = SolverState::Idle;
    }

    /// Change the pool's block ceiling without discarding any state, e.g. to
    /// retry a search that failed with [`SolveError::OutOfMemory`].
    pub fn set_max_blocks(&mut self, max_blocks: usize) {
        self.pool.set_max_blocks(max_blocks);
        log::debug!(
            "pool ceiling set to {} blocks ({} states)",
            self.pool.max_blocks(),
            self.pool.capacity()
        );
    }

    /// Find the cheapest path from `start` to `end`.
    ///
    /// `path` is cleared, then filled with `start..=end` on success. It stays
    /// empty for identical endpoints and on error.
    pub fn solve(
        &mut self,
        start: G::Node,
        end: G::Node,
        path: &mut Vec<G::Node>,
    ) -> Result<Solved, SolveError> {
        path.clear();
        if !self.graph.contains(start) {
            return Err(SolveError::InvalidEndpoint(Endpoint::Start));
        }
        if !self.graph.contains(end) {
            return Err(SolveError::InvalidEndpoint(Endpoint::End));
        }
        if start == end {
            self.state = SolverState::Solved;
            return Ok(Solved::StartEndIdentical);
        }

        self.solves += 1;
        let cached = match self.path_cache.as_mut() {
            Some(pc) => match pc.lookup(start, end, path) {
                CacheLookup::Solved(cost) => Some(Ok(Solved::Path { cost })),
                CacheLookup::NoSolution => Some(Err(SolveError::NoSolution)),
                CacheLookup::Miss => None,
            },
            None => None,
        };
        let result = match cached {
            Some(result) => result,
            None => self.astar(start, end, path),
        };

        self.state = match result {
            Ok(_) => SolverState::Solved,
            Err(SolveError::OutOfMemory { .. }) => SolverState::OutOfMemory,
            Err(_) => SolverState::NoSolution,
        };
        match result {
            Err(SolveError::OutOfMemory { capacity }) => log::warn!(
                "search {} -> {} aborted: pool exhausted at {capacity} states",
                self.graph.describe(start),
                self.graph.describe(end),
            ),
            _ => log::trace!(
                "search {} -> {}: {:?} ({} states in pool)",
                self.graph.describe(start),
                self.graph.describe(end),
                result,
                self.pool.len(),
            ),
        }
        result
    }

    fn astar(
        &mut self,
        start: G::Node,
        end: G::Node,
        path: &mut Vec<G::Node>,
    ) -> Result<Solved, SolveError> {
        self.begin_frame();

        let start_id = self.state_for(start)?;
        let h = self.graph.estimate(start, end);
        self.touch(start_id, h);
        self.open_with(start_id, 0.0, None);

        while let Some(entry) = self.open.pop() {
            let rec = &mut self.pool[entry.id];
            if rec.frame != self.frame || !rec.open || rec.seq != entry.seq {
                continue;
            }
            debug_assert_eq!(entry.f, rec.f());
            rec.open = false;
            rec.closed = true;

            if rec.node == end {
                let cost = rec.g;
                self.build_path(entry.id, path);
                if let Some(pc) = self.path_cache.as_mut() {
                    pc.add_path(&path[..], &self.gbuf);
                }
                return Ok(Solved::Path { cost });
            }

            let g = rec.g;
            let edges = self.adjacency(entry.id)?;
            for e in &edges {
                if self.pool[e.to].frame != self.frame {
                    let h = self.graph.estimate(self.pool[e.to].node, end);
                    self.touch(e.to, h);
                }
                self.relax(entry.id, g, e);
            }
            self.pool[entry.id].edges = Some(edges);
        }

        if let Some(pc) = self.path_cache.as_mut() {
            let pool = &self.pool;
            pc.add_no_solution(end, self.touched.iter().map(|&id| pool[id].node));
        }
        Err(SolveError::NoSolution)
    }

    /// Append every node currently known to the solver, in allocation order.
    pub fn states_in_pool(&self, out: &mut Vec<G::Node>) {
        out.clear();
        out.extend(self.pool.iter().map(|r| r.node));
    }

    pub fn stats(&self) -> SolverStats {
        SolverStats {
            solves: self.solves,
            expansions: self.expansions,
            states: self.pool.len(),
            blocks: self.pool.blocks(),
            block_size: self.pool.block_size(),
            max_blocks: self.pool.max_blocks(),
            path_cache: self
                .path_cache
                .as_ref()
                .map(PathCache::data)
                .unwrap_or_default(),
        }
    }

    // -----------------------------------------------------------------------
    // Search internals shared with near-state search
    // -----------------------------------------------------------------------

    /// Start a new search: records from older frames become untouched.
    pub(crate) fn begin_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        if self.frame == 0 {
            for rec in self.pool.iter_mut() {
                rec.frame = 0;
            }
            self.frame = 1;
        }
        self.open.clear();
        self.touched.clear();
    }

    /// Record for `node`, allocating it on first sight.
    pub(crate) fn state_for(&mut self, node: G::Node) -> Result<StateId, SolveError> {
        if let Some(id) = self.cache.get(node) {
            return Ok(id);
        }
        let id = self.pool.allocate(StateRecord::new(node))?;
        self.cache.insert(node, id);
        Ok(id)
    }

    /// Initialise the per-search fields of `id` for the current frame.
    pub(crate) fn touch(&mut self, id: StateId, h: f32) {
        self.pool[id].touch(self.frame, h);
        self.touched.push(id);
    }

    /// Set the cost of `id` to `g` via `parent` and (re)insert it into the
    /// open set.
    pub(crate) fn open_with(&mut self, id: StateId, g: f32, parent: Option<StateId>) {
        let rec = &mut self.pool[id];
        rec.g = g;
        rec.parent = parent;
        rec.open = true;
        rec.closed = false;
        rec.seq = self.open.push(id, rec.f());
    }

    /// Offer the path through `from` (at cost `g`) along `edge`.
    #[inline]
    pub(crate) fn relax(&mut self, from: StateId, g: f32, edge: &Edge) {
        let candidate = g + edge.cost;
        let rec = &self.pool[edge.to];
        if candidate < rec.g {
            if rec.closed {
                log::trace!("reopening {}", self.graph.describe(rec.node));
            }
            self.open_with(edge.to, candidate, Some(from));
        }
    }

    /// Finite-cost edges of `id`, enumerated through the graph on the first
    /// expansion and cached afterwards. The caller puts the vector back into
    /// the record once done with it.
    ///
    /// Edges are committed only once every neighbor has a record, so an
    /// allocation failure leaves `id` unexpanded.
    pub(crate) fn adjacency(&mut self, id: StateId) -> Result<Vec<Edge>, SolveError> {
        self.expansions += 1;
        if let Some(edges) = self.pool[id].edges.take() {
            return Ok(edges);
        }

        let node = self.pool[id].node;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.graph.neighbors(node, &mut nbuf);

        let mut edges = Vec::with_capacity(nbuf.len());
        let mut result = Ok(());
        for sc in nbuf.iter() {
            debug_assert!(sc.cost >= 0.0, "negative edge cost");
            if !sc.cost.is_finite() {
                continue;
            }
            match self.state_for(sc.node) {
                Ok(to) => edges.push(Edge { to, cost: sc.cost }),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        self.nbuf = nbuf;
        result.map(|()| edges)
    }

    fn build_path(&mut self, goal: StateId, path: &mut Vec<G::Node>) {
        path.clear();
        self.gbuf.clear();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            let rec = &self.pool[id];
            path.push(rec.node);
            self.gbuf.push(rec.g);
            cur = rec.parent;
        }
        path.reverse();
        self.gbuf.reverse();
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::testutil::TestGrid;
    use proptest::prelude::*;

    /// Plain Dijkstra over the same grid, O(n²) node selection.
    fn reference_cost(grid: &TestGrid, start: (i32, i32), end: (i32, i32)) -> Option<f32> {
        let (w, h) = grid.size();
        let idx = |(x, y): (i32, i32)| (y * w + x) as usize;
        let mut dist = vec![f32::INFINITY; (w * h) as usize];
        let mut done = vec![false; dist.len()];
        dist[idx(start)] = 0.0;
        loop {
            let next = (0..dist.len())
                .filter(|&i| !done[i] && dist[i].is_finite())
                .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
            let Some(i) = next else {
                return None;
            };
            let p = (i as i32 % w, i as i32 / w);
            if p == end {
                return Some(dist[i]);
            }
            done[i] = true;
            for q in [(p.0 + 1, p.1), (p.0, p.1 - 1), (p.0 - 1, p.1), (p.0, p.1 + 1)] {
                if let Some(c) = grid.enter_cost(q) {
                    let j = idx(q);
                    if dist[i] + c < dist[j] {
                        dist[j] = dist[i] + c;
                    }
                }
            }
        }
    }

    fn grid_strategy() -> impl Strategy<Value = (i32, i32, Vec<Option<f32>>)> {
        (2..9i32, 2..9i32).prop_flat_map(|(w, h)| {
            let cell = prop_oneof![
                1 => Just(None),
                4 => (1u8..=5).prop_map(|v| Some(f32::from(v))),
            ];
            (
                Just(w),
                Just(h),
                proptest::collection::vec(cell, (w * h) as usize),
            )
        })
    }

    proptest! {
        #[test]
        fn agrees_with_reference_dijkstra(
            (w, h, weights) in grid_strategy(),
            a in 0..81i32,
            b in 0..81i32,
            path_cache in any::<bool>(),
        ) {
            let grid = TestGrid::from_weights(w, h, &weights);
            let start = (a % w, (a / w) % h);
            let end = (b % w, (b / w) % h);
            let expected = reference_cost(&grid, start, end);

            let mut s = Solver::new(grid, SolverConfig { block_size: 7, path_cache, ..Default::default() });
            let mut path = Vec::new();
            let r = s.solve(start, end, &mut path);

            if start == end {
                prop_assert_eq!(r, Ok(Solved::StartEndIdentical));
                return Ok(());
            }
            match expected {
                None => prop_assert_eq!(r, Err(SolveError::NoSolution)),
                Some(cost) => {
                    prop_assert_eq!(r, Ok(Solved::Path { cost }));
                    prop_assert_eq!(path.first(), Some(&start));
                    prop_assert_eq!(path.last(), Some(&end));
                    let mut walked = 0.0;
                    for step in path.windows(2) {
                        let (p, q) = (step[0], step[1]);
                        prop_assert_eq!((p.0 - q.0).abs() + (p.1 - q.1).abs(), 1);
                        walked += s.graph().enter_cost(q).unwrap();
                    }
                    prop_assert_eq!(walked, cost);
                }
            }
        }

        #[test]
        fn repeat_and_reset_are_deterministic(
            (w, h, weights) in grid_strategy(),
            a in 0..81i32,
            b in 0..81i32,
        ) {
            let grid = TestGrid::from_weights(w, h, &weights);
            let start = (a % w, (a / w) % h);
            let end = (b % w, (b / w) % h);
            let mut s = Solver::new(grid, SolverConfig { path_cache: false, ..Default::default() });

            let mut first = Vec::new();
            let r1 = s.solve(start, end, &mut first);
            let mut again = Vec::new();
            let r2 = s.solve(start, end, &mut again);
            s.reset();
            let mut after_reset = Vec::new();
            let r3 = s.solve(start, end, &mut after_reset);

            prop_assert_eq!(r1, r2);
            prop_assert_eq!(r1, r3);
            prop_assert_eq!(&first, &again);
            prop_assert_eq!(&first, &after_reset);
        }
    }
}

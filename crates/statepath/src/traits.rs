use std::fmt::Debug;
use std::hash::Hash;

/// A neighbor of a node together with the cost of the edge leading to it.
///
/// A cost of [`f32::INFINITY`] keeps the edge in the enumeration but marks it
/// impassable, e.g. a closed door.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateCost<N> {
    pub node: N,
    pub cost: f32,
}

impl<N> StateCost<N> {
    #[inline]
    pub const fn new(node: N, cost: f32) -> Self {
        Self { node, cost }
    }
}

/// A caller-defined state graph.
///
/// The solver never inspects node identities beyond hashing and comparing
/// them. Whenever the answers of [`estimate`](Graph::estimate) or
/// [`neighbors`](Graph::neighbors) change, the caller must call
/// [`Solver::reset`](crate::Solver::reset): cached adjacency and solved paths
/// are not revalidated.
pub trait Graph {
    /// Node identity. A plain value, never a handle to owned memory.
    type Node: Copy + Eq + Hash + Debug;

    /// Estimated cost from `from` to `to`.
    ///
    /// Must be non-negative and never overestimate the true cost, otherwise
    /// returned paths are not guaranteed to be optimal.
    fn estimate(&self, from: Self::Node, to: Self::Node) -> f32;

    /// Append the neighbors of `node` into `buf`. The caller clears `buf`
    /// before calling. Costs must be non-negative.
    fn neighbors(&self, node: Self::Node, buf: &mut Vec<StateCost<Self::Node>>);

    /// Whether `node` belongs to the graph. Queried for query endpoints only.
    fn contains(&self, _node: Self::Node) -> bool {
        true
    }

    /// Human-readable description of a node, used for diagnostics only.
    fn describe(&self, node: Self::Node) -> String {
        format!("{node:?}")
    }
}

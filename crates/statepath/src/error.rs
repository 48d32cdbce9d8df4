use std::fmt;

/// Which endpoint of a query was rejected by [`Graph::contains`](crate::Graph::contains).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Reasons a search did not produce a path.
///
/// None of these are retried internally. `NoSolution` is an ordinary
/// outcome; `OutOfMemory` can be recovered from by raising the pool ceiling
/// ([`Solver::set_max_blocks`](crate::Solver::set_max_blocks)) or by calling
/// [`Solver::reset`](crate::Solver::reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The goal cannot be reached from the start.
    #[error("no path between start and end")]
    NoSolution,
    /// The state pool hit its configured ceiling before the search finished.
    #[error("state pool exhausted ({capacity} states)")]
    OutOfMemory { capacity: usize },
    /// An endpoint lies outside the graph's domain.
    #[error("{0} node is outside the graph")]
    InvalidEndpoint(Endpoint),
}

//! A* search over caller-defined state graphs.
//!
//! A graph is anything implementing [`Graph`]: a heuristic estimate and a
//! neighbor enumeration over plain-value node identities. [`Solver`] owns
//! the graph together with all search bookkeeping:
//!
//! - a block-allocated state pool with a hard ceiling ([`SolverConfig`]),
//!   exhausted searches fail with [`SolveError::OutOfMemory`];
//! - a node → state index whose records keep each node's adjacency after
//!   its first expansion;
//! - an optional cache of solved paths and known failures.
//!
//! All of it survives between [`Solver::solve`] calls until
//! [`Solver::reset`], which the caller must invoke after changing any edge
//! cost. A solver is single-threaded; independent solvers are independent.
//!
//! ```
//! use statepath::{Graph, StateCost, Solver, SolverConfig};
//!
//! struct Line;
//!
//! impl Graph for Line {
//!     type Node = i32;
//!     fn estimate(&self, a: i32, b: i32) -> f32 {
//!         (a - b).abs() as f32
//!     }
//!     fn neighbors(&self, n: i32, buf: &mut Vec<StateCost<i32>>) {
//!         buf.push(StateCost::new(n - 1, 1.0));
//!         buf.push(StateCost::new(n + 1, 1.0));
//!     }
//! }
//!
//! let mut solver = Solver::new(Line, SolverConfig::default());
//! let mut path = Vec::new();
//! let solved = solver.solve(0, 3, &mut path).unwrap();
//! assert_eq!(solved.cost(), 3.0);
//! assert_eq!(path, vec![0, 1, 2, 3]);
//! ```

mod cache;
mod config;
mod error;
mod near;
mod open;
mod pathcache;
mod pool;
mod solver;
mod traits;

#[cfg(test)]
mod testutil;

pub use config::SolverConfig;
pub use error::{Endpoint, SolveError};
pub use pathcache::CacheData;
pub use solver::{SolveStatus, Solved, Solver, SolverState, SolverStats};
pub use traits::{Graph, StateCost};

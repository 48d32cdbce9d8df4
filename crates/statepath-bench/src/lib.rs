//! Grid maps and a bucketed latency benchmark for [`statepath`].
//!
//! - [`GridMap`]: ASCII maps with walls, weighted floor and doors, usable as
//!   a [`statepath::Graph`] with 4- or 8-directional movement.
//! - [`maps`]: the reference dungeon and speed maps.
//! - [`harness`]: the benchmark driver and its outcome buckets.

pub mod geom;
pub mod grid;
pub mod harness;
pub mod maps;

pub use geom::{Point, euclidean, manhattan};
pub use grid::{DIAGONAL_COST, Directions, GridMap, MapError, Terrain};
pub use harness::{BenchConfig, BenchReport, Bucket, BucketStats, RunReport, Thresholds, Trial};

//! Bucketed latency benchmark.
//!
//! Endpoints are spread evenly over the map, snapped to passable cells and
//! shuffled. Consecutive endpoints are then solved pairwise (the last one
//! pairs with the first), once per movement model and reset policy, and
//! every solve is filed into one of five buckets by outcome and length.

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use statepath::{SolveStatus, Solved, Solver, SolverConfig};

use crate::geom::{Point, manhattan};
use crate::grid::{Directions, GridMap};

/// Outcome category of a single solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bucket {
    Short,
    Medium,
    Long,
    FailShort,
    FailLong,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Self::Short,
        Self::Medium,
        Self::Long,
        Self::FailShort,
        Self::FailLong,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "med  ",
            Self::Long => "long ",
            Self::FailShort => "fail short",
            Self::FailLong => "fail long ",
        }
    }
}

/// Cost limits separating short, medium and long paths.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    pub short: f32,
    pub medium: f32,
}

impl Thresholds {
    /// A quarter and a half of the map width (integer division).
    pub fn for_width(width: i32) -> Self {
        Self {
            short: (width / 4) as f32,
            medium: (width / 2) as f32,
        }
    }

    /// Solved paths are split by cost; failures by the Manhattan distance
    /// between their endpoints against the short threshold.
    pub fn classify(&self, status: SolveStatus, cost: f32, start: Point, end: Point) -> Bucket {
        match status {
            SolveStatus::Solved | SolveStatus::StartEndIdentical => {
                if cost < self.short {
                    Bucket::Short
                } else if cost < self.medium {
                    Bucket::Medium
                } else {
                    Bucket::Long
                }
            }
            SolveStatus::NoSolution | SolveStatus::OutOfMemory | SolveStatus::InvalidEndpoint => {
                if (manhattan(start, end) as f32) < self.short {
                    Bucket::FailShort
                } else {
                    Bucket::FailLong
                }
            }
        }
    }
}

/// Benchmark parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchConfig {
    /// Number of endpoints, and of solves per run.
    pub num_tests: usize,
    /// Seed for the endpoint shuffle.
    pub seed: u64,
    /// Movement models to benchmark, in order.
    pub directions: Vec<Directions>,
    pub solver: SolverConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            num_tests: 389,
            seed: 0x5eed,
            directions: vec![Directions::Four, Directions::Eight],
            // One block covers the whole speed map.
            solver: SolverConfig {
                block_size: 90 * 20,
                ..Default::default()
            },
        }
    }
}

/// One timed solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trial {
    pub start: Point,
    pub end: Point,
    pub status: SolveStatus,
    /// Path cost, 0 unless solved.
    pub cost: f32,
    pub elapsed: Duration,
    pub bucket: Bucket,
}

/// Count and accumulated time of the trials in one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketStats {
    pub count: usize,
    pub total: Duration,
}

impl BucketStats {
    /// Mean latency in microseconds, 0 for an empty bucket.
    pub fn mean_us(&self) -> f64 {
        mean_us(self.total, self.count)
    }
}

fn mean_us(total: Duration, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total.as_nanos() as f64 / count as f64 * 0.001
    }
}

/// All trials of one movement model and reset policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub directions: Directions,
    /// Whether the solver was reset before every solve.
    pub reset_each: bool,
    pub buckets: [BucketStats; 5],
    pub trials: Vec<Trial>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new(
        directions: Directions,
        reset_each: bool,
        trials: Vec<Trial>,
        elapsed: Duration,
    ) -> Self {
        let mut buckets = [BucketStats::default(); 5];
        for t in &trials {
            let b = &mut buckets[t.bucket.index()];
            b.count += 1;
            b.total += t.elapsed;
        }
        Self {
            directions,
            reset_each,
            buckets,
            trials,
            elapsed,
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> BucketStats {
        self.buckets[bucket.index()]
    }

    /// Mean latency over all trials, in microseconds.
    pub fn mean_us(&self) -> f64 {
        let total = self.buckets.iter().map(|b| b.total).sum();
        let count = self.buckets.iter().map(|b| b.count).sum();
        mean_us(total, count)
    }
}

/// Results of [`run`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchReport {
    pub thresholds: Thresholds,
    pub runs: Vec<RunReport>,
}

impl BenchReport {
    /// Average of the per-run mean latencies, in microseconds.
    pub fn composite_us(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        self.runs.iter().map(RunReport::mean_us).sum::<f64>() / self.runs.len() as f64
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            writeln!(
                f,
                "Average of {} runs. Reset={}. Dir={}.",
                run.trials.len(),
                run.reset_each,
                run.directions.count()
            )?;
            for bucket in Bucket::ALL {
                let stats = run.bucket(bucket);
                let label = format!("{}({:4})", bucket.label(), stats.count);
                writeln!(f, "{label:<17} = {:7.2}", stats.mean_us())?;
            }
            writeln!(f, "{:<17} = {:7.2}", "Average", run.mean_us())?;
        }
        write!(f, "Composite average = {:7.2}", self.composite_us())
    }
}

/// `n` endpoints spaced evenly over the map's cells in row-major order, each
/// moved forward (wrapping) to the next passable cell. Empty if the map has
/// no passable cell.
pub fn start_candidates(map: &GridMap, n: usize) -> Vec<Point> {
    let len = map.len();
    if n == 0 || !(0..len).any(|i| map.passable(map.point(i))) {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let mut idx = len * i / n;
            while !map.passable(map.point(idx)) {
                idx = (idx + 1) % len;
            }
            map.point(idx)
        })
        .collect()
}

/// Shuffle by swapping every position with a uniformly chosen one.
pub fn permute(points: &mut [Point], rng: &mut impl Rng) {
    let n = points.len();
    for i in 0..n {
        let j = rng.random_range(0..n);
        points.swap(i, j);
    }
}

/// Run the benchmark over `map`.
///
/// For each entry of `config.directions` the solver is reset, then two runs
/// are made: one keeping solver state between solves, one resetting before
/// every solve.
pub fn run(map: GridMap, config: &BenchConfig) -> BenchReport {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut points = start_candidates(&map, config.num_tests);
    permute(&mut points, &mut rng);
    let n = points.len();

    let thresholds = Thresholds::for_width(map.width());
    let mut solver = Solver::new(map, config.solver.clone());
    let mut path = Vec::new();
    let mut runs = Vec::with_capacity(config.directions.len() * 2);

    for &directions in &config.directions {
        solver.graph_mut().set_directions(directions);
        solver.reset();

        for reset_each in [false, true] {
            let mut trials = Vec::with_capacity(n);
            let clock = Instant::now();
            for i in 0..n {
                if reset_each {
                    solver.reset();
                }
                let start = points[i];
                let end = points[(i + 1) % n];

                let t0 = Instant::now();
                let result = solver.solve(start, end, &mut path);
                let elapsed = t0.elapsed();

                let status = SolveStatus::of(&result);
                let cost = result.map_or(0.0, Solved::cost);
                trials.push(Trial {
                    start,
                    end,
                    status,
                    cost,
                    elapsed,
                    bucket: thresholds.classify(status, cost, start, end),
                });
            }
            let report = RunReport::new(directions, reset_each, trials, clock.elapsed());
            log::info!(
                "dir={} reset={}: {} solves in {:?}, mean {:.2}us",
                directions.count(),
                reset_each,
                n,
                report.elapsed,
                report.mean_us()
            );
            runs.push(report);
        }
    }

    let stats = solver.stats();
    log::debug!(
        "final pool: {} states in {} blocks, path cache hit fraction {:.2}",
        stats.states,
        stats.blocks,
        stats.path_cache.hit_fraction
    );
    BenchReport { thresholds, runs }
}

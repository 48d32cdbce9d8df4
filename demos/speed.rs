//! Bucketed solver benchmark on the 90×20 speed map.
//!
//! Run: cargo run --release --bin speed -- --seed 7
//! Set RUST_LOG=info for per-run timings on stderr.

use clap::Parser;
use statepath_bench::harness::{self, BenchConfig};
use statepath_bench::maps::SPEED;
use statepath_bench::{Directions, GridMap};

#[derive(Parser)]
#[command(name = "speed")]
#[command(about = "Time repeated A* solves on the speed map, bucketed by outcome")]
struct Cli {
    /// Number of endpoints (and solves per run)
    #[arg(short = 'n', long, default_value_t = 389)]
    tests: usize,

    /// Seed for the endpoint shuffle
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// State pool block size
    #[arg(long, default_value_t = 90 * 20)]
    block_size: usize,

    /// Benchmark only 4- or only 8-directional movement
    #[arg(long, value_parser = ["4", "8"])]
    dir: Option<String>,

    /// Disable the solved-path cache
    #[arg(long)]
    no_path_cache: bool,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let map = match GridMap::from_rows(SPEED) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut config = BenchConfig {
        num_tests: cli.tests,
        seed: cli.seed,
        ..Default::default()
    };
    config.solver.block_size = cli.block_size;
    config.solver.path_cache = !cli.no_path_cache;
    match cli.dir.as_deref() {
        Some("4") => config.directions = vec![Directions::Four],
        Some("8") => config.directions = vec![Directions::Eight],
        _ => {}
    }

    log::info!(
        "speed test: {} endpoints, seed {}, block size {}, path cache {}",
        config.num_tests,
        config.seed,
        config.solver.block_size,
        config.solver.path_cache
    );
    let report = harness::run(map, &config);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{report}");
    }
}

//! Sweep seeds and report landmark placement shortfalls for a config.
//!
//! Useful for picking a retry cap: run with increasing `--retry-cap` until the
//! deficit rate is acceptable.

use std::collections::HashMap;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use realm_generator::placement::LandmarkCategory;
use realm_generator::{World, WorldConfig};

#[derive(Parser, Debug)]
#[command(name = "debug_placement")]
struct Args {
    /// First seed of the sweep
    #[arg(long, default_value = "0")]
    start_seed: u64,

    /// Number of seeds to try
    #[arg(short = 'n', long, default_value = "100")]
    count: u64,

    #[arg(long, default_value = "50")]
    width: usize,

    #[arg(long, default_value = "50")]
    height: usize,

    #[arg(long, default_value = "1000")]
    retry_cap: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .init();

    let args = Args::parse();

    let mut short_worlds: HashMap<LandmarkCategory, u64> = HashMap::new();
    let mut missing: HashMap<LandmarkCategory, usize> = HashMap::new();
    let mut requested = None;

    for seed in args.start_seed..args.start_seed + args.count {
        let config = WorldConfig {
            width: args.width,
            height: args.height,
            retry_cap: args.retry_cap,
            ..WorldConfig::default().with_seed(seed)
        };
        requested.get_or_insert(config.targets);

        let world = World::generate(config)?;
        for (category, wanted, placed) in world.placement_report().deficits() {
            *short_worlds.entry(category).or_default() += 1;
            *missing.entry(category).or_default() += wanted - placed;
        }
    }

    println!(
        "=== PLACEMENT SWEEP ({}x{}, retry cap {}, seeds {}..{}) ===",
        args.width,
        args.height,
        args.retry_cap,
        args.start_seed,
        args.start_seed + args.count
    );
    for &category in LandmarkCategory::all() {
        let wanted = requested.map(|t| t.get(category)).unwrap_or(0);
        let short = short_worlds.get(&category).copied().unwrap_or(0);
        let lost = missing.get(&category).copied().unwrap_or(0);
        println!(
            "  {:<8} requested {:>3}  short in {:>4} worlds ({:.1}%)  {} instances missing",
            category.name(),
            wanted,
            short,
            100.0 * short as f64 / args.count.max(1) as f64,
            lost
        );
    }

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use realm_generator::ascii;
use realm_generator::events::WorldEvent;
use realm_generator::npc::{Npc, Quest};
use realm_generator::placement::PlacementReport;
use realm_generator::{Coord, GridSnapshot, World, WorldConfig};

#[derive(Parser, Debug)]
#[command(name = "realm_generator")]
#[command(about = "Generate a fantasy tile world with landmarks, NPCs and events")]
struct Args {
    /// JSON config file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the grid in tiles
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the grid in tiles
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of villages to place
    #[arg(long)]
    villages: Option<usize>,

    /// Number of ruins to place
    #[arg(long)]
    ruins: Option<usize>,

    /// Number of dungeons to place
    #[arg(long)]
    dungeons: Option<usize>,

    /// Sampling attempts per landmark before giving up
    #[arg(long)]
    retry_cap: Option<usize>,

    /// Movement ticks to simulate after generation
    #[arg(short, long, default_value = "20")]
    ticks: u64,

    /// Ticks between scheduled world events (0 disables them)
    #[arg(long)]
    event_interval: Option<u64>,

    /// Export grid, NPCs and quests to a JSON file
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Disable ANSI colours in the printed map
    #[arg(long)]
    no_color: bool,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn build_config(&self) -> Result<WorldConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => WorldConfig::from_json_file(path)?,
            None => WorldConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(villages) = self.villages {
            config.targets.villages = villages;
        }
        if let Some(ruins) = self.ruins {
            config.targets.ruins = ruins;
        }
        if let Some(dungeons) = self.dungeons {
            config.targets.dungeons = dungeons;
        }
        if let Some(retry_cap) = self.retry_cap {
            config.retry_cap = retry_cap;
        }
        if let Some(interval) = self.event_interval {
            config.event_interval = interval;
        }
        // Explicit seed wins, then the config file's, then a random one
        match (self.seed, &self.config) {
            (Some(seed), _) => config.seed = seed,
            (None, None) => config.seed = rand::random(),
            (None, Some(_)) => {}
        }

        Ok(config)
    }
}

/// Everything an external consumer needs, in JSON-friendly form
#[derive(Serialize)]
struct WorldExport<'a> {
    seed: u64,
    tick: u64,
    grid: GridSnapshot,
    npcs: &'a [Npc],
    active_quests: Vec<(Coord, &'a Quest)>,
    completed_quests: Vec<(Coord, &'a Quest)>,
    placement: &'a PlacementReport,
    last_event: Option<&'a WorldEvent>,
    last_lore: Option<&'a str>,
}

impl<'a> WorldExport<'a> {
    fn new(world: &'a World) -> Self {
        Self {
            seed: world.seeds().master,
            tick: world.tick(),
            grid: world.grid_snapshot(),
            npcs: world.npcs(),
            active_quests: world.quests().active().iter().map(|(k, q)| (*k, q)).collect(),
            completed_quests: world.quests().completed().iter().map(|(k, q)| (*k, q)).collect(),
            placement: world.placement_report(),
            last_event: world.last_event(),
            last_lore: world.last_lore(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.build_config()?;
    let mut world = World::generate(config)?;

    for (category, requested, placed) in world.placement_report().deficits() {
        warn!("only {} of {} {} placed; consider a larger --retry-cap", placed, requested, category);
    }

    println!("{}", world.next_lore());

    let events = world.advance(args.ticks);
    for event in &events {
        match event.ruin_at {
            Some(at) => println!("* {} (ruins at {})", event.description, at),
            None => println!("* {}", event.description),
        }
    }

    let orphaned = world.orphaned_npcs().len();
    if orphaned > 0 {
        info!(orphaned, "some NPCs lost their landmark to world events");
    }

    println!();
    print!("{}", ascii::render_map(&world.grid_snapshot(), world.npcs(), !args.no_color));
    println!("{}", ascii::legend());

    for (kind, count) in world.terrain_counts() {
        info!("{:>9}: {}", kind.name(), count);
    }
    info!(
        npcs = world.npcs().len(),
        active_quests = world.quests().active().len(),
        ticks = world.tick(),
        "simulation finished"
    );

    if let Some(path) = &args.export_json {
        let json = serde_json::to_string_pretty(&WorldExport::new(&world))?;
        std::fs::write(path, json)?;
        info!("exported world to {}", path.display());
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

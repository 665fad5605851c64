//! World data container and generation pipeline
//!
//! `World` owns the grid and runs the stages in a fixed order:
//! field -> classification -> landmark placement -> population. After
//! generation, movement ticks and world events may interleave freely; both
//! run on the caller's thread and never overlap.
//!
//! External consumers get copies (`grid_snapshot`, `npc_snapshot`) or shared
//! references; nothing outside this module mutates the grid.

use std::collections::BTreeMap;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify;
use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::events::{self, WorldEvent};
use crate::movement;
use crate::noise_field;
use crate::npc::{self, Npc, QuestLog, TradeOffer};
use crate::placement::{self, PlacementReport};
use crate::seeds::{stage_rng, WorldSeeds};
use crate::terrain::{Grid, TerrainKind};
use crate::tilemap::{Coord, Tilemap};

/// Read-only copy of the grid, row-major
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TerrainKind>,
}

impl GridSnapshot {
    pub fn get(&self, x: usize, y: usize) -> Option<TerrainKind> {
        if x < self.width && y < self.height {
            Some(self.tiles[y * self.width + x])
        } else {
            None
        }
    }
}

/// A generated world plus its simulation state
pub struct World {
    config: WorldConfig,
    seeds: WorldSeeds,
    grid: Grid,
    field: Tilemap<f32>,
    placement: PlacementReport,
    npcs: Vec<Npc>,
    quests: QuestLog,
    trades: BTreeMap<Coord, TradeOffer>,
    movement_rng: ChaCha8Rng,
    event_rng: ChaCha8Rng,
    lore_rng: ChaCha8Rng,
    tick: u64,
    last_event: Option<WorldEvent>,
    last_lore: Option<String>,
}

impl World {
    /// Validate `config` and run the full generation pipeline.
    pub fn generate(config: WorldConfig) -> Result<Self, WorldError> {
        let seeds = WorldSeeds::from_master(config.seed);
        Self::generate_with_seeds(config, seeds)
    }

    /// Like [`World::generate`] but with explicit per-stage seeds.
    /// `config.seed` is ignored in favour of `seeds`.
    pub fn generate_with_seeds(config: WorldConfig, seeds: WorldSeeds) -> Result<Self, WorldError> {
        config.validate()?;

        info!(width = config.width, height = config.height, seed = seeds.master, "generating world");

        let field = noise_field::generate_field(
            config.width,
            config.height,
            &config.field,
            &mut stage_rng(seeds.field),
        );
        let (min_v, max_v) = field.value_range();
        debug!(min = min_v, max = max_v, "field generated");

        let mut grid = classify::classify(&field, &config.thresholds)?;
        info!(
            water = grid.count(&TerrainKind::Water),
            grass = grid.count(&TerrainKind::Grass),
            forest = grid.count(&TerrainKind::Forest),
            mountain = grid.count(&TerrainKind::Mountain),
            desert = grid.count(&TerrainKind::Desert),
            "terrain classified"
        );

        let placement = placement::place_landmarks(
            &mut grid,
            &config.targets,
            config.retry_cap,
            &mut stage_rng(seeds.placement),
        );

        let population = npc::populate(&grid, &config.npcs, &mut stage_rng(seeds.population));

        Ok(Self {
            movement_rng: stage_rng(seeds.movement),
            event_rng: stage_rng(seeds.events),
            lore_rng: stage_rng(seeds.lore),
            config,
            seeds,
            grid,
            field,
            placement,
            npcs: population.npcs,
            quests: population.quests,
            trades: population.trades,
            tick: 0,
            last_event: None,
            last_lore: None,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn seeds(&self) -> &WorldSeeds {
        &self.seeds
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Ticks advanced so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The continuous field the grid was classified from
    pub fn field(&self) -> &Tilemap<f32> {
        &self.field
    }

    pub fn grid_snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.grid.width,
            height: self.grid.height,
            tiles: self.grid.as_slice().to_vec(),
        }
    }

    /// Terrain kind at (x, y)
    pub fn tile(&self, x: usize, y: usize) -> Result<TerrainKind, WorldError> {
        self.grid.try_get(x, y).copied().ok_or(WorldError::OutOfBounds {
            x,
            y,
            width: self.grid.width,
            height: self.grid.height,
        })
    }

    /// NPCs standing on (x, y)
    pub fn npcs_at(&self, x: usize, y: usize) -> Result<Vec<&Npc>, WorldError> {
        self.tile(x, y)?;
        let coord = Coord::new(x, y);
        Ok(self.npcs.iter().filter(|n| n.position == coord).collect())
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn npc_snapshot(&self) -> Vec<Npc> {
        self.npcs.clone()
    }

    pub fn quests(&self) -> &QuestLog {
        &self.quests
    }

    /// Entry point for quest resolution. Returns `false` if no active quest
    /// is keyed at `key`.
    pub fn complete_quest(&mut self, key: Coord) -> bool {
        self.quests.complete(key)
    }

    pub fn trades(&self) -> &BTreeMap<Coord, TradeOffer> {
        &self.trades
    }

    pub fn placement_report(&self) -> &PlacementReport {
        &self.placement
    }

    pub fn last_event(&self) -> Option<&WorldEvent> {
        self.last_event.as_ref()
    }

    pub fn last_lore(&self) -> Option<&str> {
        self.last_lore.as_deref()
    }

    /// Move every NPC once. Returns how many changed tile.
    pub fn step(&mut self) -> usize {
        let moved = movement::step_npcs(&mut self.npcs, &self.grid, &mut self.movement_rng);
        self.tick += 1;
        moved
    }

    /// Run `ticks` movement ticks, firing a scheduled event every
    /// `event_interval` ticks. Returns the events fired, in order.
    pub fn advance(&mut self, ticks: u64) -> Vec<WorldEvent> {
        let interval = self.config.event_interval;
        let mut fired = Vec::new();

        for _ in 0..ticks {
            self.step();
            if interval > 0 && self.tick % interval == 0 {
                if let Some(event) = self.trigger_event() {
                    fired.push(event.clone());
                }
            }
        }

        fired
    }

    /// Fire one world event now.
    pub fn trigger_event(&mut self) -> Option<&WorldEvent> {
        let event = events::trigger_event(&mut self.grid, &self.config.events, &mut self.event_rng)?;
        info!(tick = self.tick, category = ?event.category, "{}", event.description);
        self.last_event = Some(event);
        self.last_event.as_ref()
    }

    /// Draw the next lore line.
    pub fn next_lore(&mut self) -> &str {
        let line = self.config.lore.pick(&mut self.lore_rng).unwrap_or_default().to_string();
        self.last_lore.insert(line).as_str()
    }

    /// NPCs whose origin tile no longer holds their landmark kind, e.g. after
    /// a ruin event overwrote a village. This is a tolerated state.
    pub fn orphaned_npcs(&self) -> Vec<&Npc> {
        self.npcs
            .iter()
            .filter(|n| *self.grid.at(n.origin) != n.kind.landmark())
            .collect()
    }

    /// Tile count per terrain kind (kinds with zero tiles included)
    pub fn terrain_counts(&self) -> BTreeMap<TerrainKind, usize> {
        let mut counts: BTreeMap<TerrainKind, usize> =
            TerrainKind::all().iter().map(|&k| (k, 0)).collect();
        for (_, _, kind) in self.grid.iter() {
            *counts.entry(*kind).or_default() += 1;
        }
        counts
    }
}

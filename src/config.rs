//! Construction-time configuration for world generation
//!
//! Everything a world needs is injected here; nothing is read from globals.
//! Validation is eager: `World::generate` refuses an invalid config before
//! touching any RNG.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::Thresholds;
use crate::error::ConfigError;
use crate::events::EventCatalog;
use crate::lore::LoreCatalog;
use crate::noise_field::FieldParams;
use crate::npc::NpcCatalog;
use crate::placement::PlacementTargets;

/// Default sampling attempts per landmark instance
pub const DEFAULT_RETRY_CAP: usize = 1000;

/// Configuration for a generated world
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // Grid
    pub width: usize,
    pub height: usize,
    /// Master seed; every stage derives its own seed from it
    pub seed: u64,

    // Terrain
    pub field: FieldParams,
    pub thresholds: Thresholds,

    // Landmarks
    pub targets: PlacementTargets,
    /// Maximum sampling attempts per landmark instance
    pub retry_cap: usize,

    // Simulation
    /// Ticks between scheduled events in `World::advance` (0 = never)
    pub event_interval: u64,

    // Catalogs
    pub npcs: NpcCatalog,
    pub events: EventCatalog,
    pub lore: LoreCatalog,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            seed: 0,
            field: FieldParams::default(),
            thresholds: Thresholds::default(),
            targets: PlacementTargets::default(),
            retry_cap: DEFAULT_RETRY_CAP,
            event_interval: 10,
            npcs: NpcCatalog::default(),
            events: EventCatalog::default(),
            lore: LoreCatalog::default(),
        }
    }
}

impl WorldConfig {
    /// Small world for quick tests and tools
    pub fn minimal() -> Self {
        Self {
            width: 16,
            height: 16,
            targets: PlacementTargets {
                villages: 2,
                ruins: 1,
                dungeons: 1,
            },
            retry_cap: 200,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Load from a JSON file. Missing fields take their defaults.
    /// The result is not validated yet.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.field.validate()?;
        self.thresholds.validate()?;
        if self.retry_cap == 0 && self.targets.total() > 0 {
            return Err(ConfigError::ZeroRetryCap {
                requested: self.targets.total(),
            });
        }
        self.npcs.validate()?;
        self.events.validate()?;
        self.lore.validate()?;
        Ok(())
    }
}

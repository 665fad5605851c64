//! Scripted world events
//!
//! Each trigger picks one catalog entry uniformly at random. `NewRuin` events
//! overwrite a random tile with Ruins unconditionally, whatever was there
//! before. That can leave an NPC without its backing landmark; callers treat
//! such NPCs as a valid state (see `World::orphaned_npcs`).

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::terrain::{Grid, TerrainKind};
use crate::tilemap::Coord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Weather,
    Omen,
    Conflict,
    Festival,
    /// Collapses a random tile into Ruins
    NewRuin,
}

impl EventCategory {
    pub fn mutates_grid(&self) -> bool {
        matches!(self, EventCategory::NewRuin)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub description: String,
    pub category: EventCategory,
}

/// A fired event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub description: String,
    pub category: EventCategory,
    /// Tile overwritten with Ruins, if any
    pub ruin_at: Option<Coord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCatalog {
    pub entries: Vec<EventEntry>,
}

impl Default for EventCatalog {
    fn default() -> Self {
        let entries = [
            ("A fierce storm sweeps across the land.", EventCategory::Weather),
            ("A thick fog settles over the valleys.", EventCategory::Weather),
            ("A comet blazes across the night sky.", EventCategory::Omen),
            ("Bandits raid the trade roads.", EventCategory::Conflict),
            ("The villages celebrate the harvest festival.", EventCategory::Festival),
            ("An earthquake topples an old tower into ruin.", EventCategory::NewRuin),
        ];
        Self {
            entries: entries
                .iter()
                .map(|(description, category)| EventEntry {
                    description: description.to_string(),
                    category: *category,
                })
                .collect(),
        }
    }
}

impl EventCatalog {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::EmptyEventCatalog);
        }
        Ok(())
    }
}

/// Fire one event, applying its grid side effect. Returns `None` only for an
/// empty catalog.
pub fn trigger_event(grid: &mut Grid, catalog: &EventCatalog, rng: &mut ChaCha8Rng) -> Option<WorldEvent> {
    if catalog.entries.is_empty() {
        return None;
    }
    let entry = &catalog.entries[rng.gen_range(0..catalog.entries.len())];

    let ruin_at = if entry.category.mutates_grid() {
        let x = rng.gen_range(0..grid.width);
        let y = rng.gen_range(0..grid.height);
        let previous = *grid.get(x, y);
        grid.set(x, y, TerrainKind::Ruins);
        debug!(x, y, %previous, "event overwrote tile with ruins");
        Some(Coord::new(x, y))
    } else {
        None
    };

    debug!(category = ?entry.category, description = %entry.description, "world event");

    Some(WorldEvent {
        description: entry.description.clone(),
        category: entry.category,
        ruin_at,
    })
}

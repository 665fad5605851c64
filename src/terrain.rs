//! Terrain kinds for the world grid
//!
//! Natural kinds come from classification; landmark kinds are only ever
//! written by placement and world events.

use serde::{Deserialize, Serialize};

use crate::tilemap::Tilemap;

/// The world grid: one terrain kind per tile.
pub type Grid = Tilemap<TerrainKind>;

/// Closed set of tile kinds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainKind {
    #[default]
    Water,
    Grass,
    Forest,
    Mountain,
    Desert,
    Village,
    Ruins,
    Dungeon,
}

impl TerrainKind {
    pub fn all() -> &'static [TerrainKind] {
        &[
            TerrainKind::Water,
            TerrainKind::Grass,
            TerrainKind::Forest,
            TerrainKind::Mountain,
            TerrainKind::Desert,
            TerrainKind::Village,
            TerrainKind::Ruins,
            TerrainKind::Dungeon,
        ]
    }

    /// Natural kinds in ascending classification rank.
    pub fn natural() -> &'static [TerrainKind] {
        &[
            TerrainKind::Water,
            TerrainKind::Grass,
            TerrainKind::Forest,
            TerrainKind::Mountain,
            TerrainKind::Desert,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            TerrainKind::Water => "Water",
            TerrainKind::Grass => "Grass",
            TerrainKind::Forest => "Forest",
            TerrainKind::Mountain => "Mountain",
            TerrainKind::Desert => "Desert",
            TerrainKind::Village => "Village",
            TerrainKind::Ruins => "Ruins",
            TerrainKind::Dungeon => "Dungeon",
        }
    }

    pub fn is_natural(&self) -> bool {
        self.rank().is_some()
    }

    pub fn is_landmark(&self) -> bool {
        matches!(self, TerrainKind::Village | TerrainKind::Ruins | TerrainKind::Dungeon)
    }

    /// NPCs may stand on anything but open water.
    pub fn is_passable(&self) -> bool {
        *self != TerrainKind::Water
    }

    /// Classification rank (Water = 0 .. Desert = 4). Landmarks have no rank.
    pub fn rank(&self) -> Option<usize> {
        match self {
            TerrainKind::Water => Some(0),
            TerrainKind::Grass => Some(1),
            TerrainKind::Forest => Some(2),
            TerrainKind::Mountain => Some(3),
            TerrainKind::Desert => Some(4),
            _ => None,
        }
    }
}

impl std::fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

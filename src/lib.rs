//! Fantasy world generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod classify;
pub mod config;
pub mod error;
pub mod events;
pub mod lore;
pub mod movement;
pub mod noise_field;
pub mod npc;
pub mod placement;
pub mod seeds;
pub mod terrain;
pub mod tilemap;
pub mod world;

pub use config::WorldConfig;
pub use error::{ConfigError, WorldError};
pub use terrain::{Grid, TerrainKind};
pub use tilemap::Coord;
pub use world::{GridSnapshot, World};

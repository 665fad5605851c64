//! Seed management for world generation
//!
//! Provides separate seeds for each pipeline stage, allowing fine-grained control
//! over which aspects of a world to vary or keep constant.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeds for all world generation stages.
///
/// Each stage gets its own seed, derived from a master seed by default,
/// so extra draws in one stage never shift another stage's sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Noise field sampling
    pub field: u64,
    /// Landmark placement coordinates
    pub placement: u64,
    /// NPC dialogue choices
    pub population: u64,
    /// NPC movement steps
    pub movement: u64,
    /// World event selection and targets
    pub events: u64,
    /// Lore selection
    pub lore: u64,
}

impl WorldSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            field: derive_seed(master, "field"),
            placement: derive_seed(master, "placement"),
            population: derive_seed(master, "population"),
            movement: derive_seed(master, "movement"),
            events: derive_seed(master, "events"),
            lore: derive_seed(master, "lore"),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> WorldSeedsBuilder {
        WorldSeedsBuilder::new(master)
    }
}

/// Build an RNG for one stage.
pub fn stage_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Builder for customizing individual seeds while deriving others from master
pub struct WorldSeedsBuilder {
    seeds: WorldSeeds,
}

impl WorldSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: WorldSeeds::from_master(master),
        }
    }

    pub fn field(mut self, seed: u64) -> Self {
        self.seeds.field = seed;
        self
    }

    pub fn placement(mut self, seed: u64) -> Self {
        self.seeds.placement = seed;
        self
    }

    pub fn population(mut self, seed: u64) -> Self {
        self.seeds.population = seed;
        self
    }

    pub fn movement(mut self, seed: u64) -> Self {
        self.seeds.movement = seed;
        self
    }

    pub fn events(mut self, seed: u64) -> Self {
        self.seeds.events = seed;
        self
    }

    pub fn lore(mut self, seed: u64) -> Self {
        self.seeds.lore = seed;
        self
    }

    pub fn build(self) -> WorldSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a stage name.
fn derive_seed(master: u64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for WorldSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorldSeeds {{ master: {}, field: {}, placement: {}, population: {}, \
             movement: {}, events: {}, lore: {} }}",
            self.master, self.field, self.placement, self.population, self.movement, self.events, self.lore,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        assert_eq!(WorldSeeds::from_master(12345), WorldSeeds::from_master(12345));
    }

    #[test]
    fn test_different_stages_get_different_seeds() {
        let seeds = WorldSeeds::from_master(12345);
        assert_ne!(seeds.field, seeds.placement);
        assert_ne!(seeds.placement, seeds.population);
        assert_ne!(seeds.movement, seeds.events);
        assert_ne!(seeds.events, seeds.lore);
    }

    #[test]
    fn test_builder_override() {
        let seeds = WorldSeeds::builder(12345).movement(99999).build();
        assert_eq!(seeds.movement, 99999);

        let default_seeds = WorldSeeds::from_master(12345);
        assert_eq!(seeds.field, default_seeds.field);
        assert_eq!(seeds.placement, default_seeds.placement);
    }
}

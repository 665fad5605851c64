//! Flavor text selection, independent of the grid.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_LORE: &[&str] = &[
    "Long ago, the mountains were giants who fell asleep beneath the stars.",
    "The first village was founded where a fallen star cooled in the river.",
    "Some say the deserts were once seas, drained by a thirsting god.",
    "Every ruin was a kingdom that forgot the name of its founder.",
    "The dungeons were dug by a people who feared the sky.",
    "Forests grow thickest where old battles were fought.",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoreCatalog {
    pub entries: Vec<String>,
}

impl Default for LoreCatalog {
    fn default() -> Self {
        Self {
            entries: DEFAULT_LORE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LoreCatalog {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::EmptyLoreCatalog);
        }
        Ok(())
    }

    /// Pick one entry uniformly at random.
    pub fn pick(&self, rng: &mut ChaCha8Rng) -> Option<&str> {
        self.entries.choose(rng).map(String::as_str)
    }
}

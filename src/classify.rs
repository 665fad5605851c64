//! Threshold classification of a continuous field into natural terrain kinds.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::terrain::{Grid, TerrainKind};
use crate::tilemap::Tilemap;

/// Default cut points between Water | Grass | Forest | Mountain | Desert
pub const DEFAULT_THRESHOLDS: [f32; 4] = [0.2, 0.5, 0.7, 0.85];

/// Ordered cut points. Must hold exactly four finite, strictly ascending values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thresholds(Vec<f32>);

impl Default for Thresholds {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLDS.to_vec())
    }
}

impl Thresholds {
    /// Build and validate a threshold list.
    pub fn new(values: Vec<f32>) -> Result<Self, ConfigError> {
        let thresholds = Self(values);
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.0.len() != 4 {
            return Err(ConfigError::ThresholdCount(self.0.len()));
        }
        if self.0.iter().any(|t| !t.is_finite()) {
            return Err(ConfigError::NonFiniteThreshold(self.0.clone()));
        }
        if self.0.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::ThresholdsNotAscending(self.0.clone()));
        }
        Ok(())
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// Classify a single value. Anything at or above the last threshold is Desert.
    pub fn classify_value(&self, value: f32) -> TerrainKind {
        let natural = TerrainKind::natural();
        self.0
            .iter()
            .position(|&t| value < t)
            .map(|i| natural[i])
            .unwrap_or(TerrainKind::Desert)
    }
}

/// Classify every tile of `field`. Never produces landmark kinds.
pub fn classify(field: &Tilemap<f32>, thresholds: &Thresholds) -> Result<Grid, ConfigError> {
    thresholds.validate()?;
    Ok(field.map(|&v| thresholds.classify_value(v)))
}

//! Continuous field synthesis
//!
//! Produces one real value per tile. The default source draws independent
//! uniform samples and smooths them so neighbouring tiles trend together;
//! a Perlin fBm source is available for larger coherent features.

use noise::{NoiseFn, Perlin, Seedable};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tilemap::Tilemap;

/// Where raw field values come from before smoothing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldSource {
    /// Independent uniform samples in [0, 1)
    SmoothedUniform,
    /// Fractal Brownian motion over Perlin noise, remapped to [0, 1]
    Perlin { frequency: f64, octaves: u32 },
}

impl Default for FieldSource {
    fn default() -> Self {
        FieldSource::SmoothedUniform
    }
}

/// Parameters for field generation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub source: FieldSource,
    /// Radius of the weighted local average (0 = no smoothing)
    pub smoothing_radius: usize,
    /// Rescale the smoothed field to [0, 1] by its min/max
    pub normalize: bool,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            source: FieldSource::default(),
            smoothing_radius: 2,
            normalize: true,
        }
    }
}

impl FieldParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let FieldSource::Perlin { frequency, octaves } = self.source {
            if !(frequency.is_finite() && frequency > 0.0) {
                return Err(ConfigError::InvalidFrequency(frequency));
            }
            if octaves == 0 {
                return Err(ConfigError::ZeroOctaves);
            }
        }
        Ok(())
    }
}

/// Generate a field for a `width` x `height` grid.
///
/// Deterministic for a fixed RNG state and parameters.
pub fn generate_field(width: usize, height: usize, params: &FieldParams, rng: &mut ChaCha8Rng) -> Tilemap<f32> {
    let raw = match params.source {
        FieldSource::SmoothedUniform => sample_uniform(width, height, rng),
        FieldSource::Perlin { frequency, octaves } => sample_perlin(width, height, frequency, octaves, rng),
    };

    let smoothed = smooth_field(&raw, params.smoothing_radius);

    if params.normalize {
        normalize_field(&smoothed)
    } else {
        smoothed
    }
}

fn sample_uniform(width: usize, height: usize, rng: &mut ChaCha8Rng) -> Tilemap<f32> {
    let mut field = Tilemap::new_with(width, height, 0.0f32);
    for (_, _, value) in field.iter_mut() {
        *value = rng.gen::<f32>();
    }
    field
}

fn sample_perlin(width: usize, height: usize, frequency: f64, octaves: u32, rng: &mut ChaCha8Rng) -> Tilemap<f32> {
    let noise = Perlin::new(1).set_seed(rng.gen::<u32>());
    let mut field = Tilemap::new_with(width, height, 0.0f32);

    for (x, y, value) in field.iter_mut() {
        let n = fbm(&noise, x as f64 * frequency, y as f64 * frequency, octaves, 0.5, 2.0);
        *value = ((n + 1.0) * 0.5).clamp(0.0, 1.0) as f32;
    }

    field
}

/// Weighted local average over a disc of `radius` tiles, clamped at the edges.
pub fn smooth_field(field: &Tilemap<f32>, radius: usize) -> Tilemap<f32> {
    if radius == 0 {
        return field.clone();
    }

    let width = field.width;
    let height = field.height;
    let r = radius as i64;
    let mut result = Tilemap::new_with(width, height, 0.0f32);

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            let mut total_weight = 0.0f32;

            for dy in -r..=r {
                for dx in -r..=r {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }

                    let dist = ((dx * dx + dy * dy) as f32).sqrt();
                    if dist <= radius as f32 {
                        let weight = 1.0 - dist / (radius as f32 + 1.0);
                        sum += *field.get(nx as usize, ny as usize) * weight;
                        total_weight += weight;
                    }
                }
            }

            result.set(x, y, sum / total_weight);
        }
    }

    result
}

/// Normalize field values to the 0.0-1.0 range. A flat field is returned unchanged.
pub fn normalize_field(field: &Tilemap<f32>) -> Tilemap<f32> {
    let (min_val, max_val) = field.value_range();
    let range = max_val - min_val;
    if range < 0.0001 {
        return field.clone();
    }

    field.map(|&v| (v - min_val) / range)
}

/// Fractional Brownian Motion noise
fn fbm(noise: &impl NoiseFn<f64, 2>, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}

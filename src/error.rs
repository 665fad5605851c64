//! Error types for world construction and queries.
//!
//! Placement shortfalls are not errors; they are reported through
//! [`crate::placement::PlacementReport`].

/// Invalid construction-time configuration. Raised eagerly by
/// [`crate::config::WorldConfig::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("expected 4 classification thresholds, got {0}")]
    ThresholdCount(usize),

    #[error("classification thresholds must be finite, got {0:?}")]
    NonFiniteThreshold(Vec<f32>),

    #[error("classification thresholds must be strictly ascending, got {0:?}")]
    ThresholdsNotAscending(Vec<f32>),

    #[error("retry cap is zero but {requested} landmarks were requested")]
    ZeroRetryCap { requested: usize },

    #[error("perlin frequency must be positive, got {0}")]
    InvalidFrequency(f64),

    #[error("perlin octave count must be at least 1")]
    ZeroOctaves,

    #[error("dialogue catalog for {0} is empty")]
    EmptyDialogue(&'static str),

    #[error("event catalog is empty")]
    EmptyEventCatalog,

    #[error("lore catalog is empty")]
    EmptyLoreCatalog,
}

/// Errors surfaced by [`crate::world::World`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Only returned from query accessors, never from the pipeline.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

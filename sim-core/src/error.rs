//! Error types for the simulation engine.
//!
//! Invalid quencher placements are not errors: they are resampled inside
//! the driver and never surface here.

/// A run configuration that cannot produce a meaningful simulation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A lattice dimension is zero.
    #[error("{field} must be at least 1")]
    EmptyLattice { field: &'static str },

    /// A length parameter is non-finite or outside its allowed range.
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// The exclusion radius reaches past the effective distance, so an
    /// overlapping quencher would go unnoticed.
    #[error("radius {radius} exceeds effective distance {effect_d}")]
    RadiusExceedsReach { radius: f64, effect_d: f64 },

    /// The activation rate is not a probability.
    #[error("activation rate must lie in [0, 1], got {0}")]
    ActivationRate(f64),

    /// The chain constant would make chain-linked sites start inactive.
    #[error("chain constant must be positive")]
    ChainConstant,

    /// No emitter started active, so the quenched fraction is undefined.
    #[error("baseline active count is zero; no emitter started active")]
    NoActiveEmitters,
}

/// Errors returned by the simulation engine.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

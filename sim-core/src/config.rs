//! Run configuration for one quenching simulation.
//!
//! A [`Config`] is set once before a run starts and never mutated. The three
//! presets ([`Config::planar`], [`Config::layered`], [`Config::chain`]) cover
//! the 2D model, the simple layered model and the chain-reaction model; each
//! field can be overridden afterwards.

use crate::{error::ConfigError, types::Status};

/// Lattice dimensionality.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dimension {
    /// A single 2D layer at z = 0.
    Planar,
    /// `layers` copies of the 2D pattern stacked along z, `step_z` apart.
    Layered { layers: usize, step_z: f64 },
}

impl Dimension {
    pub const fn layers(&self) -> usize {
        match self {
            Dimension::Planar => 1,
            Dimension::Layered { layers, .. } => *layers,
        }
    }

    pub const fn step_z(&self) -> f64 {
        match self {
            Dimension::Planar => 0.0,
            Dimension::Layered { step_z, .. } => *step_z,
        }
    }
}

/// How a chain-linked site responds to repeated reactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChainDepletion {
    /// Only an untouched site (status still equal to the chain constant)
    /// is depleted; later reactions leave it alone.
    #[default]
    FirstHit,
    /// Every reaction within range depletes the site until it reaches zero.
    Progressive,
}

/// What happens to an emitter when a quencher lands within the effective
/// distance but outside the exclusion radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReactionPolicy {
    /// The emitter is quenched outright.
    Simple,
    /// First-layer sites start at `linked_status` and are depleted by the
    /// quencher strength; ordinary sites are unaffected.
    Chain {
        linked_status: Status,
        depletion: ChainDepletion,
    },
}

/// Depth band of indirect-stage quenchers below the first layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndirectDepth {
    /// `z` in `(-effect_d + 0.1, -effect_d + 1]`, within reach of the sites
    /// directly above.
    #[default]
    Adjacent,
    /// `z` in `[-effect_d - 0.9, -effect_d + 0.1)`, mostly just out of reach.
    BelowReach,
}

impl IndirectDepth {
    /// Maps a uniform draw `u` in `[0, 1)` to a depth.
    ///
    /// ### Parameters
    /// - `u` - Uniform sample in `[0, 1)`.
    /// - `effect_d` - Effective distance of a quencher.
    ///
    /// ### Returns
    /// The z coordinate of the quencher.
    pub fn z(self, u: f64, effect_d: f64) -> f64 {
        match self {
            IndirectDepth::Adjacent => -(u * 0.9) - (effect_d - 1.0),
            IndirectDepth::BelowReach => u - effect_d - 0.9,
        }
    }
}

/// How quencher positions are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplingPolicy {
    /// In-plane samples until `quenchers` valid placements are accepted.
    SingleStage { quenchers: u64 },
    /// `direct` in-plane samples that must change the active count, then
    /// `indirect` samples drawn just below the first layer and accepted
    /// unconditionally.
    TwoStage {
        direct: u64,
        indirect: u64,
        /// Reuse the last direct-stage y coordinate for every indirect sample.
        reuse_previous_y: bool,
        depth: IndirectDepth,
    },
}

impl SamplingPolicy {
    /// Total number of records a run produces.
    pub const fn target(&self) -> u64 {
        match self {
            SamplingPolicy::SingleStage { quenchers } => *quenchers,
            SamplingPolicy::TwoStage {
                direct, indirect, ..
            } => direct.saturating_add(*indirect),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Sites per row and rows per layer.
    pub width: usize,
    pub dimension: Dimension,
    /// Edge length of the equilateral triangles (site spacing along x).
    pub step_x: f64,
    /// Exclusion radius of an emitter body.
    pub radius: f64,
    /// Maximum distance at which a quencher affects an emitter.
    pub effect_d: f64,
    /// Probability that a site starts active.
    pub activation_rate: f64,
    pub reaction: ReactionPolicy,
    pub sampling: SamplingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self::planar()
    }
}

impl Config {
    /// Single-layer model with instant quenching.
    pub const fn planar() -> Self {
        Self {
            width: 100,
            dimension: Dimension::Planar,
            step_x: 6.1,
            radius: 1.0,
            effect_d: 10.0,
            activation_rate: 1.0,
            reaction: ReactionPolicy::Simple,
            sampling: SamplingPolicy::SingleStage { quenchers: 5000 },
        }
    }

    /// Stacked layers with instant quenching and in-plane sampling.
    pub const fn layered() -> Self {
        Self {
            width: 50,
            dimension: Dimension::Layered {
                layers: 2,
                step_z: 6.5 * 3.0,
            },
            step_x: 6.1,
            radius: 1.0,
            effect_d: 5.0,
            activation_rate: 0.95,
            reaction: ReactionPolicy::Simple,
            sampling: SamplingPolicy::SingleStage { quenchers: 500 },
        }
    }

    /// Stacked layers with chain-linked first-layer sites and two-stage sampling.
    pub const fn chain() -> Self {
        Self {
            reaction: ReactionPolicy::Chain {
                linked_status: Status::CHAIN_LINKED,
                depletion: ChainDepletion::FirstHit,
            },
            sampling: SamplingPolicy::TwoStage {
                direct: 500,
                indirect: 500,
                reuse_previous_y: true,
                depth: IndirectDepth::Adjacent,
            },
            ..Self::layered()
        }
    }

    /// Checks every parameter before any simulation work begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::EmptyLattice { field: "width" });
        }
        if let Dimension::Layered { layers, step_z } = self.dimension {
            if layers == 0 {
                return Err(ConfigError::EmptyLattice { field: "layers" });
            }
            positive("step_z", step_z)?;
        }
        positive("step_x", self.step_x)?;
        non_negative("radius", self.radius)?;
        non_negative("effect_d", self.effect_d)?;
        if self.radius > self.effect_d {
            return Err(ConfigError::RadiusExceedsReach {
                radius: self.radius,
                effect_d: self.effect_d,
            });
        }
        if !(0.0..=1.0).contains(&self.activation_rate) {
            return Err(ConfigError::ActivationRate(self.activation_rate));
        }
        if let ReactionPolicy::Chain { linked_status, .. } = self.reaction
            && !linked_status.is_active()
        {
            return Err(ConfigError::ChainConstant);
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

//! Whole-lattice evaluation of a single quencher.
//!
//! [`evaluate`] visits every emitter in order and lets it react. The first
//! emitter that reports an invalid placement aborts the evaluation; reactions
//! already applied to earlier emitters during that call are kept.

use crate::{
    config::{Config, ReactionPolicy},
    emitter::{Reach, Reaction},
    lattice::Lattice,
};
use glam::DVec3;

/// A transient quencher sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quencher {
    pub pos: DVec3,
    /// Depletion applied to chain-linked sites. Ignored by the simple policy.
    pub strength: u32,
}

impl Quencher {
    pub const fn new(pos: DVec3, strength: u32) -> Self {
        Self { pos, strength }
    }
}

/// Reaction parameters fixed for a whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rules {
    pub reach: Reach,
    pub policy: ReactionPolicy,
}

impl From<&Config> for Rules {
    fn from(cfg: &Config) -> Self {
        Self {
            reach: Reach {
                effect_d: cfg.effect_d,
                radius: cfg.radius,
            },
            policy: cfg.reaction,
        }
    }
}

/// Result of evaluating one quencher against the whole lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// The quencher landed inside some emitter's exclusion radius.
    Invalid,
    /// Sum of all statuses after the reaction.
    Active(u64),
}

impl Evaluation {
    pub const fn active(self) -> Option<u64> {
        match self {
            Evaluation::Invalid => None,
            Evaluation::Active(n) => Some(n),
        }
    }
}

/// Lets every emitter react to `quencher` and returns the resulting active count.
pub fn evaluate(lattice: &mut Lattice, quencher: &Quencher, rules: &Rules) -> Evaluation {
    let mut count = 0u64;
    for e in &mut lattice.emitters {
        match e.react(quencher.pos, quencher.strength, &rules.reach, &rules.policy) {
            Reaction::Invalid => return Evaluation::Invalid,
            Reaction::Status(s) => count += u64::from(s),
        }
    }
    Evaluation::Active(count)
}

/// A probe position that is out of range of every emitter.
///
/// All sites sit at `z >= 0`, so a point below the first layer by more than
/// the effective distance cannot touch any of them.
pub fn probe_position(rules: &Rules) -> DVec3 {
    let depth = rules.reach.effect_d.max(rules.reach.radius) + 1.0;
    DVec3::new(0.0, 0.0, -depth)
}

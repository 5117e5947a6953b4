//! A single fluorescent emitter and its reaction to a quencher.
//!
//! Emitters only know their own position and status. Distances are tested
//! against the effective distance first, so [`Reach::radius`] must not exceed
//! [`Reach::effect_d`]; [`Config::validate`](crate::Config::validate) enforces it.

use crate::{
    config::{ChainDepletion, ReactionPolicy},
    types::Status,
};
use glam::DVec3;
use rand::Rng;

/// Outcome of a single emitter reacting to a quencher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// The quencher lies inside the emitter body; the placement must be discarded.
    Invalid,
    /// Status of the emitter after the reaction (possibly unchanged).
    Status(Status),
}

/// Distance parameters shared by every reaction in a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reach {
    /// Maximum interaction distance.
    pub effect_d: f64,
    /// Exclusion radius; a quencher at or within it is an invalid placement.
    pub radius: f64,
}

#[derive(Debug)]
pub struct Emitter {
    pub pos: DVec3,
    pub status: Status,
    /// Whether the site stands for several merged first-layer emitters.
    pub chain_linked: bool,
}

impl Emitter {
    pub const fn new(pos: DVec3, status: Status, chain_linked: bool) -> Self {
        Self {
            pos,
            status,
            chain_linked,
        }
    }

    /// Creates an emitter whose initial status is drawn against `activation_rate`.
    ///
    /// A site that activates on layer `0` under the chain policy becomes
    /// chain-linked and starts at the chain constant.
    ///
    /// ### Parameters
    /// - `pos` - Site position.
    /// - `layer` - Layer index, `0` for the layer nearest the quenchers.
    /// - `activation_rate` - Probability that the site starts active.
    /// - `policy` - Reaction policy of the run.
    /// - `rng` - Consumes exactly one unit draw.
    ///
    /// ### Returns
    /// The new [`Emitter`].
    pub fn spawn(
        pos: DVec3,
        layer: usize,
        activation_rate: f64,
        policy: &ReactionPolicy,
        rng: &mut impl Rng,
    ) -> Self {
        let u: f64 = rng.random();
        if u > activation_rate {
            return Self::new(pos, Status::INACTIVE, false);
        }
        match policy {
            ReactionPolicy::Chain { linked_status, .. } if layer == 0 => {
                Self::new(pos, *linked_status, true)
            }
            _ => Self::new(pos, Status::ACTIVE, false),
        }
    }

    /// Applies one quencher at `q` with the given `strength`.
    ///
    /// An invalid placement leaves the status untouched.
    ///
    /// ### Parameters
    /// - `q` - Quencher position.
    /// - `strength` - Amount a chain-linked site is depleted by.
    /// - `reach` - Effective distance and exclusion radius.
    /// - `policy` - Reaction policy of the run.
    ///
    /// ### Returns
    /// [`Reaction::Invalid`] if `q` lies within the exclusion radius,
    /// otherwise the status after the reaction.
    pub fn react(
        &mut self,
        q: DVec3,
        strength: u32,
        reach: &Reach,
        policy: &ReactionPolicy,
    ) -> Reaction {
        let d = self.pos.distance(q);
        if d > reach.effect_d {
            return Reaction::Status(self.status);
        }
        if d <= reach.radius {
            return Reaction::Invalid;
        }

        match policy {
            ReactionPolicy::Simple => self.status = Status::INACTIVE,
            ReactionPolicy::Chain {
                linked_status,
                depletion,
            } => {
                let untouched = self.status == *linked_status;
                let depletes = self.chain_linked
                    && match depletion {
                        ChainDepletion::FirstHit => untouched,
                        ChainDepletion::Progressive => true,
                    };
                if depletes {
                    self.status = self.status.deplete(strength);
                }
            }
        }
        Reaction::Status(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedRng;

    const REACH: Reach = Reach {
        effect_d: 10.0,
        radius: 1.0,
    };

    fn chain(depletion: ChainDepletion) -> ReactionPolicy {
        ReactionPolicy::Chain {
            linked_status: Status::CHAIN_LINKED,
            depletion,
        }
    }

    #[test]
    fn spawn_respects_activation_rate() {
        let mut rng = FixedRng::unit(0.5);
        let on = Emitter::spawn(DVec3::ZERO, 0, 0.6, &ReactionPolicy::Simple, &mut rng);
        let off = Emitter::spawn(DVec3::ZERO, 0, 0.4, &ReactionPolicy::Simple, &mut rng);
        assert_eq!(on.status, Status::ACTIVE);
        assert_eq!(off.status, Status::INACTIVE);
    }

    #[test]
    fn spawn_links_only_first_layer_under_chain_policy() {
        let mut rng = FixedRng::unit(0.5);
        let policy = chain(ChainDepletion::FirstHit);

        let first = Emitter::spawn(DVec3::ZERO, 0, 1.0, &policy, &mut rng);
        let upper = Emitter::spawn(DVec3::Z, 1, 1.0, &policy, &mut rng);
        let dark = Emitter::spawn(DVec3::ZERO, 0, 0.0, &policy, &mut rng);

        assert_eq!(first.status, Status::CHAIN_LINKED);
        assert!(first.chain_linked);
        assert_eq!(upper.status, Status::ACTIVE);
        assert!(!upper.chain_linked);
        assert_eq!(dark.status, Status::INACTIVE);
        assert!(!dark.chain_linked);
    }

    #[test]
    fn out_of_range_quencher_changes_nothing() {
        let mut e = Emitter::new(DVec3::ZERO, Status::ACTIVE, false);
        let r = e.react(DVec3::new(10.5, 0.0, 0.0), 1, &REACH, &ReactionPolicy::Simple);
        assert_eq!(r, Reaction::Status(Status::ACTIVE));
        assert_eq!(e.status, Status::ACTIVE);
    }

    #[test]
    fn quencher_inside_radius_is_invalid_and_does_not_mutate() {
        let mut e = Emitter::new(DVec3::ZERO, Status::ACTIVE, false);
        let r = e.react(DVec3::new(1.0, 0.0, 0.0), 1, &REACH, &ReactionPolicy::Simple);
        assert_eq!(r, Reaction::Invalid);
        assert_eq!(e.status, Status::ACTIVE);
    }

    #[test]
    fn simple_policy_quenches_in_one_hit() {
        let mut e = Emitter::new(DVec3::ZERO, Status::CHAIN_LINKED, false);
        let r = e.react(DVec3::new(5.0, 0.0, 0.0), 1, &REACH, &ReactionPolicy::Simple);
        assert_eq!(r, Reaction::Status(Status::INACTIVE));
    }

    #[test]
    fn effect_boundary_is_inclusive() {
        let mut e = Emitter::new(DVec3::ZERO, Status::ACTIVE, false);
        e.react(DVec3::new(10.0, 0.0, 0.0), 1, &REACH, &ReactionPolicy::Simple);
        assert_eq!(e.status, Status::INACTIVE);
    }

    #[test]
    fn first_hit_depletes_untouched_chain_once() {
        let policy = chain(ChainDepletion::FirstHit);
        let q = DVec3::new(3.0, 0.0, 0.0);
        let mut e = Emitter::new(DVec3::ZERO, Status::CHAIN_LINKED, true);

        assert_eq!(
            e.react(q, 2, &REACH, &policy),
            Reaction::Status(Status::ACTIVE)
        );
        // Already reacted.
        assert_eq!(
            e.react(q, 1, &REACH, &policy),
            Reaction::Status(Status::ACTIVE)
        );
    }

    #[test]
    fn progressive_chain_ends_at_zero() {
        let policy = chain(ChainDepletion::Progressive);
        let mut e = Emitter::new(DVec3::ZERO, Status::CHAIN_LINKED, true);

        e.react(DVec3::new(3.0, 0.0, 0.0), 2, &REACH, &policy);
        assert_eq!(e.status, Status::ACTIVE);
        e.react(DVec3::new(0.0, 4.0, 0.0), 1, &REACH, &policy);
        assert_eq!(e.status, Status::INACTIVE);
        e.react(DVec3::new(0.0, 4.0, 0.0), 3, &REACH, &policy);
        assert_eq!(e.status, Status::INACTIVE);
    }

    #[test]
    fn chain_policy_leaves_ordinary_sites_alone() {
        for depletion in [ChainDepletion::FirstHit, ChainDepletion::Progressive] {
            let policy = chain(depletion);
            let mut e = Emitter::new(DVec3::ZERO, Status::ACTIVE, false);
            e.react(DVec3::new(3.0, 0.0, 0.0), 3, &REACH, &policy);
            assert_eq!(e.status, Status::ACTIVE);
        }
    }

    #[test]
    fn status_never_increases() {
        let policy = chain(ChainDepletion::Progressive);
        let mut e = Emitter::new(DVec3::ZERO, Status::CHAIN_LINKED, true);
        let mut last = e.status;
        for (i, strength) in [1, 1, 2, 3, 1].into_iter().enumerate() {
            let q = DVec3::new(2.0 + i as f64, 0.0, 0.0);
            e.react(q, strength, &REACH, &policy);
            assert!(e.status <= last);
            last = e.status;
        }
        assert_eq!(e.status, Status::INACTIVE);
    }
}

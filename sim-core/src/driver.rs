//! Quencher sampling loop.
//!
//! A [`Simulation`] owns one lattice for the lifetime of a run. It draws
//! quencher positions uniformly inside the lattice's bounding extents, feeds
//! them to [`reaction::evaluate`] and reports every accepted placement as a
//! [`TraceRecord`]. Rejected placements consume entropy but never appear in
//! the trace.
//!
//! Two sampling policies are supported:
//! - **Single stage**: in-plane samples until the quota of valid placements
//!   is reached.
//! - **Two stage**: a direct stage whose samples must change the active
//!   count, then an indirect stage drawn just below the first layer that
//!   accepts every sample.

use crate::{
    config::{Config, IndirectDepth, SamplingPolicy},
    error::{ConfigError, SimError},
    lattice::{Bounds, Lattice},
    reaction::{self, Evaluation, Quencher, Rules},
};
use glam::DVec3;
use rand::Rng;
use tracing::{info, trace};

/// Which sampling stage produced a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Single,
    Direct,
    Indirect,
}

/// One accepted quencher placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceRecord {
    /// 1-based index of the accepted quencher.
    pub quencher: u64,
    /// Active count after the quencher reacted.
    pub active: u64,
    /// `(N0 - active) / N0`.
    pub quenched_fraction: f64,
    pub stage: Stage,
}

/// Sample counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub accepted: u64,
    /// Placements inside an exclusion radius.
    pub invalid: u64,
    /// Direct-stage placements that left the active count unchanged.
    pub no_op: u64,
}

impl RunStats {
    pub const fn rejected(&self) -> u64 {
        self.invalid + self.no_op
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub baseline: u64,
    pub records: Vec<TraceRecord>,
    pub stats: RunStats,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.last()
    }
}

#[derive(Debug)]
pub struct Simulation {
    cfg: Config,
    rules: Rules,
    lattice: Lattice,
    baseline: u64,
    bounds: Bounds,
}

impl Simulation {
    /// Validates `cfg`, builds the lattice and measures the baseline `N0`.
    ///
    /// The baseline is taken by evaluating a quencher placed out of reach of
    /// every emitter, so no status changes.
    ///
    /// ### Parameters
    /// - `cfg` - Run configuration; copied into the simulation.
    /// - `rng` - Entropy for the initial emitter statuses.
    ///
    /// ### Returns
    /// A [`Simulation`] ready to [`run`](Simulation::run).
    ///
    /// ### Errors
    /// - [`ConfigError`] variants for rejected parameters.
    /// - [`ConfigError::NoActiveEmitters`] if no emitter started active.
    pub fn new(cfg: &Config, rng: &mut impl Rng) -> Result<Self, SimError> {
        cfg.validate()?;
        let rules = Rules::from(cfg);
        let mut lattice = Lattice::from_config(cfg, rng);

        let probe = Quencher::new(reaction::probe_position(&rules), 1);
        let baseline = reaction::evaluate(&mut lattice, &probe, &rules)
            .active()
            .unwrap_or_else(|| lattice.active_count());
        if baseline == 0 {
            return Err(ConfigError::NoActiveEmitters.into());
        }

        let bounds = lattice.bounds();
        Ok(Self {
            cfg: *cfg,
            rules,
            lattice,
            baseline,
            bounds,
        })
    }

    pub const fn baseline(&self) -> u64 {
        self.baseline
    }

    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub const fn config(&self) -> &Config {
        &self.cfg
    }

    pub const fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Runs to completion and collects every accepted record.
    pub fn run(self, rng: &mut impl Rng) -> Trace {
        let baseline = self.baseline;
        let mut records = Vec::with_capacity(trace_capacity(self.cfg.sampling.target()));
        let stats = self.run_with(rng, |r| records.push(*r));
        Trace {
            baseline,
            records,
            stats,
        }
    }

    /// Runs to completion, handing each accepted record to `on_record` as
    /// soon as it is produced.
    ///
    /// The loop does not terminate if every sample keeps being rejected.
    pub fn run_with(
        mut self,
        rng: &mut impl Rng,
        mut on_record: impl FnMut(&TraceRecord),
    ) -> RunStats {
        info!(
            baseline = self.baseline,
            emitters = self.lattice.len(),
            target = self.cfg.sampling.target(),
            "simulation started"
        );

        let stats = match self.cfg.sampling {
            SamplingPolicy::SingleStage { quenchers } => {
                self.single_stage(quenchers, rng, &mut on_record)
            }
            SamplingPolicy::TwoStage {
                direct,
                indirect,
                reuse_previous_y,
                depth,
            } => self.two_stage(
                direct,
                indirect,
                reuse_previous_y,
                depth,
                rng,
                &mut on_record,
            ),
        };

        info!(
            accepted = stats.accepted,
            invalid = stats.invalid,
            no_op = stats.no_op,
            rejected = stats.rejected(),
            active = self.lattice.active_count(),
            "simulation finished"
        );
        stats
    }

    fn single_stage(
        &mut self,
        quenchers: u64,
        rng: &mut impl Rng,
        on_record: &mut impl FnMut(&TraceRecord),
    ) -> RunStats {
        let mut stats = RunStats::default();
        while stats.accepted < quenchers {
            let (x, y) = self.sample_plane(rng);
            let q = Quencher::new(DVec3::new(x, y, 0.0), 1);
            match reaction::evaluate(&mut self.lattice, &q, &self.rules) {
                Evaluation::Invalid => {
                    stats.invalid += 1;
                    trace!(x, y, "invalid placement");
                }
                Evaluation::Active(active) => {
                    stats.accepted += 1;
                    on_record(&self.record(stats.accepted, active, Stage::Single));
                }
            }
        }
        stats
    }

    fn two_stage(
        &mut self,
        direct: u64,
        indirect: u64,
        reuse_previous_y: bool,
        depth: IndirectDepth,
        rng: &mut impl Rng,
        on_record: &mut impl FnMut(&TraceRecord),
    ) -> RunStats {
        let mut stats = RunStats::default();
        let mut previous = self.baseline;
        let mut last_y = 0.0;

        while stats.accepted < direct {
            let (x, y) = self.sample_plane(rng);
            last_y = y;
            let strength = if rng.random::<f64>() < 0.5 { 2 } else { 3 };
            let q = Quencher::new(DVec3::new(x, y, 0.0), strength);
            match reaction::evaluate(&mut self.lattice, &q, &self.rules) {
                Evaluation::Invalid => {
                    stats.invalid += 1;
                    trace!(x, y, "invalid placement");
                }
                Evaluation::Active(active) if active == previous => {
                    stats.no_op += 1;
                    trace!(x, y, active, "no-op placement");
                }
                Evaluation::Active(active) => {
                    previous = active;
                    stats.accepted += 1;
                    on_record(&self.record(stats.accepted, active, Stage::Direct));
                }
            }
        }

        let total = direct.saturating_add(indirect);
        while stats.accepted < total {
            let x = rng.random::<f64>() * self.bounds.x;
            let fresh_y = rng.random::<f64>() * self.bounds.y;
            let y = if reuse_previous_y { last_y } else { fresh_y };
            let z = depth.z(rng.random::<f64>(), self.rules.reach.effect_d);

            let q = Quencher::new(DVec3::new(x, y, z), 1);
            let active = match reaction::evaluate(&mut self.lattice, &q, &self.rules) {
                Evaluation::Active(active) => active,
                Evaluation::Invalid => {
                    stats.invalid += 1;
                    trace!(x, y, z, "invalid indirect placement kept");
                    self.lattice.active_count()
                }
            };
            stats.accepted += 1;
            on_record(&self.record(stats.accepted, active, Stage::Indirect));
        }
        stats
    }

    fn sample_plane(&self, rng: &mut impl Rng) -> (f64, f64) {
        let x = rng.random::<f64>() * self.bounds.x;
        let y = rng.random::<f64>() * self.bounds.y;
        (x, y)
    }

    fn record(&self, quencher: u64, active: u64, stage: Stage) -> TraceRecord {
        let quenched = self.baseline.saturating_sub(active);
        TraceRecord {
            quencher,
            active,
            quenched_fraction: quenched as f64 / self.baseline as f64,
            stage,
        }
    }
}

/// Records reserved up front; larger traces grow on demand.
const MAX_PREALLOC: u64 = 1 << 16;

fn trace_capacity(target: u64) -> usize {
    target.min(MAX_PREALLOC) as usize
}

/// Builds a lattice for `cfg` and runs it to completion.
pub fn run(cfg: &Config, rng: &mut impl Rng) -> Result<Trace, SimError> {
    Ok(Simulation::new(cfg, rng)?.run(rng))
}

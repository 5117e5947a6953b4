//! Command-line arguments.
//!
//! Each model takes its parameters positionally, all optional; a
//! missing parameter keeps the model preset's value.

use clap::{Args, Parser, Subcommand};
use sim_core::{
    Config,
    config::{ChainDepletion, Dimension, IndirectDepth, ReactionPolicy, SamplingPolicy},
    types::Status,
};

#[derive(Debug, Parser)]
#[command(name = "quench-sim")]
#[command(about = "Simulates quenching of a honeycomb emitter lattice")]
pub struct Cli {
    #[command(subcommand)]
    pub model: Model,

    /// Seed for the random number generator (OS entropy when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Number of independent runs averaged into one curve
    #[arg(long, global = true, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Print every n-th record
    #[arg(long, global = true, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub every: u64,
}

#[derive(Debug, Subcommand)]
pub enum Model {
    /// Single layer, quenched in one hit
    Planar(PlanarArgs),
    /// Stacked layers, quenched in one hit, in-plane quenchers
    Layered(LayeredArgs),
    /// Stacked layers with chain-linked first layer and two-stage quenchers
    Chain(ChainArgs),
}

impl Model {
    pub const fn name(&self) -> &'static str {
        match self {
            Model::Planar(_) => "planar",
            Model::Layered(_) => "layered",
            Model::Chain(_) => "chain",
        }
    }
}

#[derive(Debug, Args)]
pub struct PlanarArgs {
    /// Sites per row and rows per layer
    pub width: Option<usize>,
    /// Emitter radius
    pub radius: Option<f64>,
    /// Effective distance of a quencher
    pub effect_d: Option<f64>,
    /// Distance between adjacent emitters
    pub step_x: Option<f64>,
    /// Initial activation rate in percent
    pub act_rate: Option<f64>,
    /// Number of quenchers
    pub num_q: Option<u64>,
}

#[derive(Debug, Args)]
pub struct LayeredArgs {
    /// Sites per row and rows per layer
    pub width: Option<usize>,
    /// Number of layers
    pub layer: Option<usize>,
    /// Emitter radius
    pub radius: Option<f64>,
    /// Effective distance of a quencher
    pub effect_d: Option<f64>,
    /// Distance between adjacent emitters
    pub step_x: Option<f64>,
    /// Distance between layers
    pub step_z: Option<f64>,
    /// Initial activation rate in percent
    pub act_rate: Option<f64>,
    /// Number of quenchers (direct-stage quenchers for the chain model)
    pub num_q: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ChainArgs {
    #[command(flatten)]
    pub layered: LayeredArgs,

    /// Indirect-stage quenchers (defaults to NUM_Q)
    #[arg(long)]
    pub indirect: Option<u64>,

    /// Draw a fresh y for indirect quenchers instead of reusing the last direct one
    #[arg(long)]
    pub fresh_y: bool,

    /// Draw indirect quenchers from the band just past the effective distance
    #[arg(long)]
    pub below_reach: bool,

    /// Deplete chain-linked sites on every reaction, not only the first
    #[arg(long)]
    pub progressive: bool,

    /// Status of an untouched chain-linked site
    #[arg(long, default_value_t = Status::CHAIN_LINKED.value())]
    pub chain: u32,
}

impl Cli {
    pub fn config(&self) -> Config {
        match &self.model {
            Model::Planar(a) => a.apply(Config::planar()),
            Model::Layered(a) => a.apply(Config::layered()),
            Model::Chain(a) => a.apply(Config::chain()),
        }
    }
}

fn percent(rate: f64) -> f64 {
    rate / 100.0
}

impl PlanarArgs {
    fn apply(&self, mut cfg: Config) -> Config {
        cfg.width = self.width.unwrap_or(cfg.width);
        cfg.radius = self.radius.unwrap_or(cfg.radius);
        cfg.effect_d = self.effect_d.unwrap_or(cfg.effect_d);
        cfg.step_x = self.step_x.unwrap_or(cfg.step_x);
        cfg.activation_rate = self.act_rate.map_or(cfg.activation_rate, percent);
        if let Some(quenchers) = self.num_q {
            cfg.sampling = SamplingPolicy::SingleStage { quenchers };
        }
        cfg
    }
}

impl LayeredArgs {
    fn apply(&self, mut cfg: Config) -> Config {
        cfg.width = self.width.unwrap_or(cfg.width);
        cfg.dimension = Dimension::Layered {
            layers: self.layer.unwrap_or(cfg.dimension.layers()),
            step_z: self.step_z.unwrap_or(cfg.dimension.step_z()),
        };
        cfg.radius = self.radius.unwrap_or(cfg.radius);
        cfg.effect_d = self.effect_d.unwrap_or(cfg.effect_d);
        cfg.step_x = self.step_x.unwrap_or(cfg.step_x);
        cfg.activation_rate = self.act_rate.map_or(cfg.activation_rate, percent);
        if let (Some(quenchers), SamplingPolicy::SingleStage { .. }) = (self.num_q, cfg.sampling)
        {
            cfg.sampling = SamplingPolicy::SingleStage { quenchers };
        }
        cfg
    }
}

impl ChainArgs {
    fn apply(&self, cfg: Config) -> Config {
        let mut cfg = self.layered.apply(cfg);
        if let SamplingPolicy::TwoStage {
            direct, indirect, ..
        } = cfg.sampling
        {
            // Both stages take NUM_Q unless told otherwise.
            let indirect = match (self.indirect, self.layered.num_q) {
                (Some(n), _) | (None, Some(n)) => n,
                (None, None) => indirect,
            };
            cfg.sampling = SamplingPolicy::TwoStage {
                direct: self.layered.num_q.unwrap_or(direct),
                indirect,
                reuse_previous_y: !self.fresh_y,
                depth: if self.below_reach {
                    IndirectDepth::BelowReach
                } else {
                    IndirectDepth::Adjacent
                },
            };
        }
        cfg.reaction = ReactionPolicy::Chain {
            linked_status: Status::new(self.chain),
            depletion: if self.progressive {
                ChainDepletion::Progressive
            } else {
                ChainDepletion::FirstHit
            },
        };
        cfg
    }
}

//! Honeycomb emitter lattice.
//!
//! Sites are generated layer by layer, row by row, column by column; odd rows
//! are shifted by half a step. The emitter index is the generation order.

use crate::{
    config::{Config, Dimension, ReactionPolicy},
    emitter::Emitter,
    types::EmitterId,
};
use glam::DVec3;
use rand::Rng;
use tracing::debug;

/// Height of an equilateral triangle relative to its edge.
pub fn row_step(step_x: f64) -> f64 {
    0.75_f64.sqrt() * step_x
}

/// Geometric parameters of a honeycomb lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub width: usize,
    pub layers: usize,
    pub step_x: f64,
    pub step_z: f64,
}

impl Geometry {
    pub fn planar(width: usize, step_x: f64) -> Self {
        Self {
            width,
            layers: 1,
            step_x,
            step_z: 0.0,
        }
    }

    pub const fn len(&self) -> usize {
        self.width * self.width * self.layers
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Site positions, layer-major then row-major then column-major.
    ///
    /// Odd rows are shifted by half a step so that neighbouring sites form
    /// equilateral triangles with edge `step_x`.
    pub fn positions(&self) -> impl Iterator<Item = (usize, DVec3)> + '_ {
        let step_y = row_step(self.step_x);
        (0..self.layers).flat_map(move |z| {
            (0..self.width).flat_map(move |y| {
                let offset = if y % 2 == 1 { self.step_x / 2.0 } else { 0.0 };
                (0..self.width).map(move |x| {
                    let pos = DVec3::new(
                        x as f64 * self.step_x + offset,
                        y as f64 * step_y,
                        z as f64 * self.step_z,
                    );
                    (z, pos)
                })
            })
        })
    }
}

impl From<&Config> for Geometry {
    fn from(cfg: &Config) -> Self {
        match cfg.dimension {
            Dimension::Planar => Self::planar(cfg.width, cfg.step_x),
            Dimension::Layered { layers, step_z } => Self {
                width: cfg.width,
                layers,
                step_x: cfg.step_x,
                step_z,
            },
        }
    }
}

/// Upper extents of the quencher sampling volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug)]
pub struct Lattice {
    pub emitters: Vec<Emitter>,
    pub geometry: Geometry,
}

impl Lattice {
    /// Builds a lattice, drawing each emitter's initial status from `rng`.
    ///
    /// ### Parameters
    /// - `geometry` - Size and spacing of the lattice.
    /// - `activation_rate` - Probability that a site starts active.
    /// - `policy` - Decides whether first-layer sites are chain-linked.
    /// - `rng` - One unit draw per site, in generation order.
    ///
    /// ### Returns
    /// A [`Lattice`] of `geometry.len()` emitters.
    pub fn generate(
        geometry: Geometry,
        activation_rate: f64,
        policy: &ReactionPolicy,
        rng: &mut impl Rng,
    ) -> Self {
        let mut emitters = Vec::with_capacity(geometry.len());
        for (layer, pos) in geometry.positions() {
            emitters.push(Emitter::spawn(pos, layer, activation_rate, policy, rng));
        }
        let lattice = Self { emitters, geometry };
        debug!(
            emitters = lattice.emitters.len(),
            bounds = ?lattice.bounds(),
            "lattice generated"
        );
        lattice
    }

    pub fn from_config(cfg: &Config, rng: &mut impl Rng) -> Self {
        Self::generate(
            Geometry::from(cfg),
            cfg.activation_rate,
            &cfg.reaction,
            rng,
        )
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    pub fn get(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters.get(id)
    }

    /// Sampling extents: x runs half a step past the last site of the first
    /// row, y and z end at the last site of the last layer.
    pub fn bounds(&self) -> Bounds {
        let row_end = self
            .get(self.geometry.width.saturating_sub(1))
            .map_or(0.0, |e| e.pos.x + self.geometry.step_x / 2.0);
        let last = self.emitters.last().map_or(DVec3::ZERO, |e| e.pos);
        Bounds {
            x: row_end,
            y: last.y,
            z: last.z,
        }
    }

    /// Current sum of all emitter statuses.
    pub fn active_count(&self) -> u64 {
        self.emitters.iter().map(|e| u64::from(e.status)).sum()
    }
}

//! Emitter lattice quenching simulation.
//!
//! Estimates how the active fraction of a honeycomb emitter lattice decays
//! as randomly placed quenchers react with it.
//!
//! Main components:
//! - [`lattice`] — honeycomb lattice generation and sampling bounds.
//! - [`emitter`] — per-site activation state and its reaction to a quencher.
//! - [`reaction`] — whole-lattice evaluation of one quencher.
//! - [`driver`] — quencher sampling loop and the resulting trace.
//! - [`curve`] — decay curves averaged over repeated runs.
//! - [`config`] — run configuration, presets and validation.
//! - [`error`] — configuration and engine errors.
//! - [`types`] — shared ids and the emitter [`types::Status`].

pub mod config;
pub mod curve;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod lattice;
pub mod reaction;
pub mod types;

pub use config::Config;
pub use driver::{Simulation, Trace, TraceRecord, run};
pub use error::{ConfigError, SimError};

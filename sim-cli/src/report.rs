//! Console output of a run.

use sim_core::{Simulation, TraceRecord, config::Dimension, curve::DecayCurve};

/// Prints the summary lines shown once before sampling starts.
pub fn header(sim: &Simulation) {
    let cfg = sim.config();
    let b = sim.bounds();
    println!("num emitters (N0): {}", sim.baseline());
    println!("emitter radius: {:.6}", cfg.radius);
    println!("effective dist: {:.6}", cfg.effect_d);
    match cfg.dimension {
        Dimension::Planar => println!("simulation zone: {:.6}, {:.6}", b.x, b.y),
        Dimension::Layered { .. } => {
            println!("simulation zone: {:.6}, {:.6}, {:.6}", b.x, b.y, b.z)
        }
    }
}

/// Prints `r` if its quencher index is a multiple of `every`.
pub fn record(r: &TraceRecord, every: u64) {
    if r.quencher % every == 0 {
        println!(
            "Q: {:6},   N: {:6},   (N0-N)/N0: {:.6}",
            r.quencher, r.active, r.quenched_fraction
        );
    }
}

/// Prints every `every`-th point of an averaged curve.
pub fn curve(curve: &DecayCurve, every: u64) {
    for (q, active, fraction) in curve.points().filter(|(q, ..)| q % every == 0) {
        println!("Q: {q:6},   N: {active:10.2},   (N0-N)/N0: {fraction:.6}");
    }
}

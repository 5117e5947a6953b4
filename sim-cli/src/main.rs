//! Command-line entry point for the emitter quenching simulation.
//!
//! This binary parses the run parameters, prints the header lines and
//! streams every n-th trace record. All simulation work is delegated to
//! the `sim_core` engine; reporting lives in the `report` module.

mod args;
mod report;

use anyhow::Context;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use sim_core::{Simulation, curve::DecayCurve};
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::Cli;

/// Runs the configured model once, or `--runs` times with an averaged curve.
///
/// ### Returns
/// - `Ok(())` once every run has completed.
/// - `Err` if the configuration is rejected before sampling starts.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = cli.config();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    info!(model = cli.model.name(), seed = ?cli.seed, runs = cli.runs, "configuration loaded");

    let sim = Simulation::new(&cfg, &mut rng).context("failed to set up simulation")?;
    report::header(&sim);

    if cli.runs == 1 {
        sim.run_with(&mut rng, |r| report::record(r, cli.every));
        return Ok(());
    }

    let mut curve = DecayCurve::default();
    curve.add_trace(&sim.run(&mut rng));
    for run in 1..cli.runs {
        let sim = Simulation::new(&cfg, &mut rng)
            .with_context(|| format!("failed to set up run {}", run + 1))?;
        info!(run = run + 1, baseline = sim.baseline(), "run started");
        curve.add_trace(&sim.run(&mut rng));
    }
    report::curve(&curve, cli.every);
    Ok(())
}

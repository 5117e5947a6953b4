use glam::DVec3;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use sim_core::{
    Config, Simulation,
    config::{ChainDepletion, Dimension, IndirectDepth, ReactionPolicy, SamplingPolicy},
    curve::DecayCurve,
    emitter::{Emitter, Reach, Reaction},
    lattice::{Geometry, Lattice},
    reaction::{Evaluation, Quencher, Rules, evaluate},
    types::Status,
};

/// Always draws 0.5.
struct HalfRng;

impl RngCore for HalfRng {
    fn next_u32(&mut self) -> u32 {
        1 << 31
    }

    fn next_u64(&mut self) -> u64 {
        1 << 63
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

fn planar_rules() -> Rules {
    Rules::from(&Config {
        width: 2,
        radius: 1.0,
        effect_d: 10.0,
        step_x: 6.1,
        activation_rate: 1.0,
        ..Config::planar()
    })
}

#[test]
fn planar_reference_lattice() {
    let lattice = Lattice::generate(
        Geometry::planar(2, 6.1),
        1.0,
        &ReactionPolicy::Simple,
        &mut HalfRng,
    );
    let expected = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(6.1, 0.0, 0.0),
        DVec3::new(3.05, 5.283, 0.0),
        DVec3::new(9.15, 5.283, 0.0),
    ];
    for (e, p) in lattice.emitters.iter().zip(expected) {
        assert!(e.pos.distance(p) < 1e-3, "{:?} != {:?}", e.pos, p);
    }

    let mut lattice = lattice;
    let rules = planar_rules();
    let on_site = Quencher::new(DVec3::ZERO, 1);
    let far = Quencher::new(DVec3::new(100.0, 100.0, 0.0), 1);
    assert_eq!(evaluate(&mut lattice, &on_site, &rules), Evaluation::Invalid);
    assert_eq!(evaluate(&mut lattice, &far, &rules), Evaluation::Active(4));
}

#[test]
fn planar_baseline_matches_reference() {
    let cfg = Config {
        width: 2,
        ..Config::planar()
    };
    let sim = Simulation::new(&cfg, &mut HalfRng).unwrap();
    assert_eq!(sim.baseline(), 4);
    assert_eq!(sim.lattice().len(), 4);
}

#[test]
fn chain_site_depleted_twice_ends_at_zero() {
    let policy = ReactionPolicy::Chain {
        linked_status: Status::CHAIN_LINKED,
        depletion: ChainDepletion::Progressive,
    };
    let reach = Reach {
        effect_d: 5.0,
        radius: 1.0,
    };
    let mut e = Emitter::spawn(DVec3::ZERO, 0, 1.0, &policy, &mut HalfRng);
    assert_eq!(e.status, Status::CHAIN_LINKED);

    assert_eq!(
        e.react(DVec3::new(2.0, 0.0, 0.0), 2, &reach, &policy),
        Reaction::Status(Status::ACTIVE)
    );
    assert_eq!(
        e.react(DVec3::new(0.0, 2.0, 0.0), 1, &reach, &policy),
        Reaction::Status(Status::INACTIVE)
    );
}

#[test]
fn evaluate_is_invalid_only_inside_a_radius() {
    let mut rng = StdRng::seed_from_u64(11);
    let cfg = Config {
        width: 8,
        ..Config::layered()
    };
    let rules = Rules::from(&cfg);
    let mut lattice = Lattice::from_config(&cfg, &mut rng);
    let initial = lattice.active_count();

    for i in 0..200 {
        let pos = DVec3::new(i as f64 * 0.37 % 45.0, i as f64 * 0.71 % 40.0, 0.0);
        let inside = lattice
            .emitters
            .iter()
            .any(|e| e.pos.distance(pos) <= cfg.radius);
        match evaluate(&mut lattice, &Quencher::new(pos, 1), &rules) {
            Evaluation::Invalid => assert!(inside, "{pos:?}"),
            Evaluation::Active(n) => {
                assert!(!inside, "{pos:?}");
                assert!(n <= initial);
            }
        }
    }
}

#[test]
fn every_model_produces_its_target_length() {
    let configs = [
        Config {
            width: 12,
            sampling: SamplingPolicy::SingleStage { quenchers: 60 },
            ..Config::planar()
        },
        Config {
            width: 12,
            sampling: SamplingPolicy::SingleStage { quenchers: 60 },
            ..Config::layered()
        },
        Config {
            width: 12,
            dimension: Dimension::Layered {
                layers: 3,
                step_z: 6.5,
            },
            sampling: SamplingPolicy::TwoStage {
                direct: 10,
                indirect: 50,
                reuse_previous_y: false,
                depth: IndirectDepth::BelowReach,
            },
            ..Config::chain()
        },
    ];

    for cfg in configs {
        let mut rng = StdRng::seed_from_u64(5);
        let trace = sim_core::run(&cfg, &mut rng).unwrap();
        assert_eq!(trace.len() as u64, cfg.sampling.target(), "{cfg:?}");
        assert_eq!(trace.stats.accepted, cfg.sampling.target());
        for (i, r) in trace.records.iter().enumerate() {
            assert_eq!(r.quencher, i as u64 + 1);
        }
    }
}

#[test]
fn repeated_runs_average_into_a_curve() {
    let cfg = Config {
        width: 10,
        activation_rate: 0.9,
        sampling: SamplingPolicy::SingleStage { quenchers: 30 },
        ..Config::planar()
    };
    let mut rng = StdRng::seed_from_u64(99);
    let mut curve = DecayCurve::with_len(30);
    for _ in 0..4 {
        let trace = sim_core::run(&cfg, &mut rng).unwrap();
        curve.add_trace(&trace);
    }

    assert!(curve.count.iter().all(|&c| c == 4));
    let points: Vec<_> = curve.points().collect();
    assert_eq!(points.len(), 30);
    for pair in points.windows(2) {
        assert!(pair[1].2 >= pair[0].2);
    }
}

//! Property tests over randomly drawn stable configurations.

use proptest::prelude::*;
use rivulet_core::{Domain, EquationCoefficients, TimeHorizon, TimeSpec};
use rivulet_engine::{Phase, RunConfig, TimeIntegrator};
use rivulet_grid::{BoundaryPolicy, GridSpec, HyperbolicDiscretization, SchemeKind};
use rivulet_stencil::StencilAssembler;
use rivulet_test_utils::profiles::random_modes;

fn transport(
    a: f64,
    n: usize,
    fraction: f64,
    policy: BoundaryPolicy,
    seed: u64,
) -> TimeIntegrator {
    let config = RunConfig::builder()
        .domain(Domain::new(0.0, 100.0).unwrap())
        .coefficients(EquationCoefficients::new(a, 0.0, 0.0).unwrap())
        .scheme(SchemeKind::Hyperbolic(
            HyperbolicDiscretization::new(n, fraction).with_policy(policy),
        ))
        .horizon(TimeHorizon::Steps(50))
        .initial_condition(random_modes(seed, 4, 10.0, 3.0, 100.0))
        .divergence_guard(true)
        .build()
        .unwrap();
    TimeIntegrator::new(config).unwrap()
}

proptest! {
    #[test]
    fn stable_transport_never_grows(
        a in prop_oneof![-20.0f64..-0.01, 0.01f64..20.0],
        n in 4usize..128,
        fraction in 0.05f64..=1.0,
        seed in any::<u64>(),
        policy in prop_oneof![
            Just(BoundaryPolicy::OneSided),
            Just(BoundaryPolicy::Periodic),
            Just(BoundaryPolicy::Reflective),
        ],
    ) {
        let mut integrator = transport(a, n, fraction, policy, seed);
        let initial_max = integrator.metrics().max_abs_value;
        for snapshot in integrator.snapshots() {
            let snapshot = snapshot.unwrap();
            prop_assert!(snapshot.max_abs() <= initial_max * (1.0 + 1e-9));
        }
    }

    #[test]
    fn periodic_transport_conserves_total(
        a in 0.5f64..5.0,
        n in 4usize..64,
        seed in any::<u64>(),
    ) {
        let mut integrator = transport(a, n, 0.5, BoundaryPolicy::Periodic, seed);
        let total: f64 = integrator.state().iter().sum();
        while integrator.remaining_steps() > 0 {
            integrator.step().unwrap();
        }
        let after: f64 = integrator.state().iter().sum();
        prop_assert!((after - total).abs() <= 1e-9 * total.abs().max(1.0));
    }

    #[test]
    fn neutral_transport_keeps_uniform_state(
        level in -100.0f64..100.0,
        n in 2usize..64,
        steps in 1u64..400,
        policy in prop_oneof![Just(BoundaryPolicy::Periodic), Just(BoundaryPolicy::Reflective)],
    ) {
        // A = 0 has no Courant step, so the run is built from parts.
        let grid = GridSpec::cells(Domain::new(0.0, 100.0).unwrap(), n).unwrap();
        let neutral = EquationCoefficients::new(0.0, 0.0, 0.0).unwrap();
        let operator = StencilAssembler::lax_friedrichs(&neutral, &grid, 1.0, policy);
        let mut integrator = TimeIntegrator::from_parts(
            grid,
            TimeSpec { t0: 0.0, dt: 1.0, step_count: steps },
            operator,
            vec![level; n],
            1,
            None,
            None,
        )
        .unwrap()
        .with_divergence_guard(true);

        for snapshot in integrator.snapshots() {
            let snapshot = snapshot.unwrap();
            for v in &snapshot.values {
                prop_assert!((v - level).abs() <= 1e-9 * level.abs().max(1.0));
            }
        }
        prop_assert_eq!(integrator.phase(), Phase::Completed);
        prop_assert_eq!(integrator.steps_taken(), steps);
    }
}

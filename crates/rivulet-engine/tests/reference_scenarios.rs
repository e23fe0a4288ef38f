//! Integration test: the two reference scenarios end to end.
//!
//! Runs the transport-decay and convection-diffusion configurations to
//! completion and checks step bookkeeping, emission cadence, and the
//! bounds each monotone scheme guarantees.

use rivulet_core::{Snapshot, TimeHorizon};
use rivulet_engine::{Phase, TimeIntegrator, VecSink};
use rivulet_test_utils::fixtures::{
    convection_diffusion_config, convection_diffusion_left, hyperbolic_reference_config,
    reference_source, transport_decay_config, REFERENCE_STRIDE,
};
use rivulet_test_utils::RecordingSink;

#[test]
fn transport_decay_full_run() {
    let config = transport_decay_config(TimeHorizon::Steps(3600), REFERENCE_STRIDE);
    let mut integrator = TimeIntegrator::new(config).unwrap();
    let initial_max = integrator.metrics().max_abs_value;
    assert!((initial_max - 9.0).abs() < 1e-12);

    let mut sink = RecordingSink::new();
    let metrics = integrator.run(&mut sink).unwrap();

    assert_eq!(metrics.steps_taken, 3600);
    assert_eq!(metrics.snapshots_emitted, 720);
    assert_eq!(sink.len(), 720);
    assert_eq!(&sink.step_numbers()[..3], &[1, 6, 11]);
    assert_eq!(*sink.step_numbers().last().unwrap(), 3596);
    // Non-negative neighbour weights: the peak only falls as the bump is
    // carried out through the open east edge.
    assert!(sink.max_abs.iter().all(|&m| m <= initial_max + 1e-9));
    assert!(sink.max_abs.last().unwrap() < &1.0);
    assert!(sink
        .last
        .as_ref()
        .unwrap()
        .values
        .iter()
        .all(|v| v.is_finite()));
    assert_eq!(integrator.phase(), Phase::Completed);
}

#[test]
fn convection_diffusion_full_run() {
    let config = convection_diffusion_config(TimeHorizon::Until(3600.0), REFERENCE_STRIDE);
    let mut integrator = TimeIntegrator::new(config).unwrap();
    let dt = integrator.time_spec().dt;
    let step_count = integrator.time_spec().step_count;
    assert_eq!(step_count, (3600.0 / dt).floor() as u64 + 1);

    let mut sink = VecSink::new();
    integrator.run(&mut sink).unwrap();

    assert!(integrator.time() >= 3600.0);
    let expected = (step_count - 1) / REFERENCE_STRIDE + 1;
    assert_eq!(sink.snapshots().len() as u64, expected);
    // Maximum principle: values stay between the extreme boundary and
    // initial values.
    for snapshot in sink.snapshots() {
        assert_eq!(snapshot.len(), 100);
        assert!(snapshot
            .values
            .iter()
            .all(|&v| (-1e-9..=275.0 + 1e-9).contains(&v)));
    }
    // The node next to the left boundary tracks its forcing.
    let last = sink.snapshots().last().unwrap();
    let left = convection_diffusion_left(last.time);
    assert!((last.values[0] - left).abs() < 0.25 * left);
}

#[test]
fn hyperbolic_reference_first_step() {
    let config = hyperbolic_reference_config(TimeHorizon::Steps(3600), 1);
    let mut integrator = TimeIntegrator::new(config).unwrap();
    let u0 = integrator.state().to_vec();
    let dt = integrator.time_spec().dt;
    let m = integrator.operator().clone();

    let first = integrator.step().unwrap().snapshot.unwrap();
    let expected = m.entry(0, 0) * u0[0] + m.entry(0, 1) * u0[1] + dt * reference_source(dt);
    assert!((first.values[0] - expected).abs() < 1e-12);
    assert_eq!(first.time, dt);
}

#[test]
fn parabolic_contribution_tracks_boundaries_every_step() {
    let config = convection_diffusion_config(TimeHorizon::Steps(10), 1);
    let mut integrator = TimeIntegrator::new(config).unwrap();
    let w = integrator.operator().weights();
    for _ in 0..10 {
        let outcome = integrator.step().unwrap();
        let c = integrator.last_contribution();
        assert_eq!(c[0], w.west * convection_diffusion_left(outcome.time));
        assert_eq!(c[c.len() - 1], 0.0);
        assert!(c[1..c.len() - 1].iter().all(|&v| v == 0.0));
    }
}

#[test]
fn early_termination_leaves_later_steps_undone() {
    let config = transport_decay_config(TimeHorizon::Steps(3600), REFERENCE_STRIDE);
    let mut stream = TimeIntegrator::new(config).unwrap().into_snapshots();
    let first_three: Vec<Snapshot> = stream.by_ref().take(3).map(Result::unwrap).collect();

    assert_eq!(first_three.len(), 3);
    assert_eq!(first_three[2].step.0, 11);
    assert_eq!(stream.integrator().steps_taken(), 11);
    assert_eq!(stream.integrator().remaining_steps(), 3589);
    drop(stream);
}

#[test]
fn repeated_runs_are_bit_identical() {
    let run = || {
        let config = convection_diffusion_config(TimeHorizon::Steps(200), 50);
        let mut sink = VecSink::new();
        TimeIntegrator::new(config).unwrap().run(&mut sink).unwrap();
        sink.into_inner()
    };
    let a = run();
    let b = run();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.time.to_bits(), y.time.to_bits());
        for (u, v) in x.values.iter().zip(&y.values) {
            assert_eq!(u.to_bits(), v.to_bits());
        }
    }
}

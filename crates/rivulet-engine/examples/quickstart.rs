//! Rivulet quickstart: both reference problems from scratch.
//!
//! Demonstrates:
//!   1. Building a hyperbolic transport-decay run with the builder
//!   2. Pulling snapshots lazily and stopping early
//!   3. Building a parabolic convection-diffusion run with a Dirichlet
//!      boundary provider and handing snapshots to a closure sink
//!   4. Reading run metrics
//!
//! Run with:
//!   cargo run --example quickstart

use std::f64::consts::PI;

use rivulet_core::{ConfigError, Domain, EquationCoefficients, Snapshot, TimeHorizon};
use rivulet_engine::{RunConfig, TimeIntegrator};
use rivulet_grid::{HyperbolicDiscretization, ParabolicDiscretization, SchemeKind};
use rivulet_stencil::FnBoundary;

const LENGTH: f64 = 1000.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let domain = Domain::new(0.0, LENGTH)?;

    // ─── Transport + decay ──────────────────────────────────────

    let transport = RunConfig::builder()
        .domain(domain)
        .coefficients(EquationCoefficients::new(3.0, 0.001, 0.0)?)
        .scheme(SchemeKind::Hyperbolic(HyperbolicDiscretization::new(400, 0.5)))
        .horizon(TimeHorizon::Steps(3600))
        .emit_every(5)
        .initial_condition(|x| 7.0 + 2.0 * (x * PI / LENGTH).sin())
        .build()?;

    let mut integrator = TimeIntegrator::new(transport)?;
    println!(
        "transport: {} cells, dt = {:.4}, courant = {:.2}",
        integrator.grid().cell_count(),
        integrator.time_spec().dt,
        integrator.metrics().courant_number.unwrap_or_default(),
    );
    for snapshot in integrator.snapshots().take(4) {
        let snapshot = snapshot?;
        println!(
            "  step {:>4}  t = {:>7.3}  peak = {:.4}",
            snapshot.step,
            snapshot.time,
            snapshot.max_abs()
        );
    }
    println!(
        "  stopped early after {} of {} steps",
        integrator.steps_taken(),
        integrator.time_spec().step_count
    );

    // ─── Convection-diffusion ───────────────────────────────────

    let diffusion = RunConfig::builder()
        .domain(domain)
        .coefficients(EquationCoefficients::new(1.0, 5.0, 0.0)?)
        .scheme(SchemeKind::Parabolic(ParabolicDiscretization::new(0.1)))
        .horizon(TimeHorizon::Until(3600.0))
        .emit_every(250)
        .initial_condition(|x| 250.0 - 0.25 * x)
        .boundary(FnBoundary::new(
            |t: f64| 250.0 + 25.0 * (t / 36.0).sin(),
            |_t: f64| 0.0,
        ))
        .build()?;

    let mut integrator = TimeIntegrator::new(diffusion)?;
    let mut print = |s: Snapshot| {
        println!(
            "  step {:>4}  t = {:>8.2}  U[0] = {:.3}",
            s.step, s.time, s.values[0]
        );
    };
    println!(
        "diffusion: {} interior nodes, dt = {:.4}",
        integrator.grid().cell_count(),
        integrator.time_spec().dt
    );
    let metrics = integrator.run(&mut print)?;
    println!(
        "  {} steps, {} snapshots, {} us stepping",
        metrics.steps_taken, metrics.snapshots_emitted, metrics.total_step_us
    );

    // ─── Rejected configuration ─────────────────────────────────

    let unstable = RunConfig::builder()
        .domain(domain)
        .coefficients(EquationCoefficients::new(1.0, 5.0, 0.0)?)
        .scheme(SchemeKind::Parabolic(ParabolicDiscretization::new(0.7)))
        .horizon(TimeHorizon::Until(3600.0))
        .build()?;
    match TimeIntegrator::new(unstable) {
        Err(err @ ConfigError::UnstableConfiguration { .. }) => println!("rejected: {err}"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}

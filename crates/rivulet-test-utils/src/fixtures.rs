//! Reference scenarios.
//!
//! - [`transport_decay_config`]: hyperbolic transport with slow decay,
//!   `A = 3`, `B = 0.001`, 400 cells on `[0, 1000)`, half the critical
//!   Courant step, sinusoidal bump `7 + 2 sin(pi x / L)`.
//! - [`convection_diffusion_config`]: parabolic boundary-value problem,
//!   `A = 1`, `B = 5`, `C = 0` on `[0, 1000]`, safety factor 0.1,
//!   left boundary `250 + 25 sin(t / 36)`, right boundary 0, linear
//!   initial profile `250 - 0.25 x`.
//! - [`hyperbolic_reference_config`]: pure transport, `A = 1`, `B = 0`,
//!   Courant fraction 0.1, initial `7 - 0.0001 x`, point source
//!   `7 + sin(t / 5)` at index 0.

use std::f64::consts::PI;

use rivulet_core::{Domain, EquationCoefficients, TimeHorizon};
use rivulet_engine::RunConfig;
use rivulet_grid::{HyperbolicDiscretization, ParabolicDiscretization, SchemeKind};
use rivulet_stencil::{FnBoundary, PointSource};

/// Upper bound of every reference domain (lower bound 0).
pub const REFERENCE_LENGTH: f64 = 1000.0;

/// Cell count of the hyperbolic scenarios.
pub const HYPERBOLIC_CELLS: usize = 400;

/// Emission stride of the reference scenarios.
pub const REFERENCE_STRIDE: u64 = 5;

pub fn reference_domain() -> Domain {
    Domain::new(0.0, REFERENCE_LENGTH).expect("reference domain is valid")
}

pub fn transport_decay_config(horizon: TimeHorizon, emit_every: u64) -> RunConfig {
    RunConfig::builder()
        .domain(reference_domain())
        .coefficients(EquationCoefficients::new(3.0, 0.001, 0.0).expect("finite"))
        .scheme(SchemeKind::Hyperbolic(HyperbolicDiscretization::new(
            HYPERBOLIC_CELLS,
            0.5,
        )))
        .horizon(horizon)
        .emit_every(emit_every)
        .initial_condition(|x| 7.0 + 2.0 * (x * PI / REFERENCE_LENGTH).sin())
        .build()
        .expect("transport-decay scenario is valid")
}

/// Left Dirichlet value of the convection-diffusion scenario.
pub fn convection_diffusion_left(t: f64) -> f64 {
    250.0 + 25.0 * (t / 36.0).sin()
}

pub fn convection_diffusion_config(horizon: TimeHorizon, emit_every: u64) -> RunConfig {
    RunConfig::builder()
        .domain(reference_domain())
        .coefficients(EquationCoefficients::new(1.0, 5.0, 0.0).expect("finite"))
        .scheme(SchemeKind::Parabolic(ParabolicDiscretization::new(0.1)))
        .horizon(horizon)
        .emit_every(emit_every)
        .initial_condition(|x| 250.0 - 0.25 * x)
        .boundary(FnBoundary::new(convection_diffusion_left, |_t: f64| 0.0))
        .build()
        .expect("convection-diffusion scenario is valid")
}

/// Source value of the hyperbolic reference scenario.
pub fn reference_source(t: f64) -> f64 {
    7.0 + (t / 5.0).sin()
}

pub fn hyperbolic_reference_config(horizon: TimeHorizon, emit_every: u64) -> RunConfig {
    RunConfig::builder()
        .domain(reference_domain())
        .coefficients(EquationCoefficients::new(1.0, 0.0, 0.0).expect("finite"))
        .scheme(SchemeKind::Hyperbolic(HyperbolicDiscretization::new(
            HYPERBOLIC_CELLS,
            0.1,
        )))
        .horizon(horizon)
        .emit_every(emit_every)
        .initial_condition(|x| 7.0 - 0.0001 * x)
        .source(PointSource::new([0], |_i: usize, t: f64| reference_source(t)))
        .build()
        .expect("hyperbolic reference scenario is valid")
}

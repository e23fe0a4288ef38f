//! Benchmark profiles for the Rivulet finite-difference engine.
//!
//! - [`transport_profile`]: Lax-Friedrichs transport-decay on a caller-sized
//!   grid, half the critical Courant step.
//! - [`diffusion_profile`]: FTCS convection-diffusion on a fixed interior
//!   grid with a time-varying left boundary.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rivulet_core::{ConfigError, Domain, EquationCoefficients, TimeHorizon};
use rivulet_engine::RunConfig;
use rivulet_grid::{GridSizing, HyperbolicDiscretization, ParabolicDiscretization, SchemeKind};
use rivulet_stencil::FnBoundary;

/// Domain length of both profiles.
pub const PROFILE_LENGTH: f64 = 1000.0;

/// Transport-decay run with `cells` cells and `steps` steps, emitting
/// every `emit_every` steps.
pub fn transport_profile(
    cells: usize,
    steps: u64,
    emit_every: u64,
) -> Result<RunConfig, ConfigError> {
    RunConfig::builder()
        .domain(Domain::new(0.0, PROFILE_LENGTH)?)
        .coefficients(EquationCoefficients::new(3.0, 0.001, 0.0)?)
        .scheme(SchemeKind::Hyperbolic(HyperbolicDiscretization::new(cells, 0.5)))
        .horizon(TimeHorizon::Steps(steps))
        .emit_every(emit_every)
        .initial_condition(|x| 7.0 + 2.0 * (x * std::f64::consts::PI / PROFILE_LENGTH).sin())
        .build()
}

/// Convection-diffusion run on `cells` interior nodes for `steps` steps.
pub fn diffusion_profile(
    cells: usize,
    steps: u64,
    emit_every: u64,
) -> Result<RunConfig, ConfigError> {
    RunConfig::builder()
        .domain(Domain::new(0.0, PROFILE_LENGTH)?)
        .coefficients(EquationCoefficients::new(1.0, 5.0, 0.0)?)
        .scheme(SchemeKind::Parabolic(
            ParabolicDiscretization::new(0.1).with_sizing(GridSizing::Fixed(cells)),
        ))
        .horizon(TimeHorizon::Steps(steps))
        .emit_every(emit_every)
        .initial_condition(|x| 250.0 - 0.25 * x)
        .boundary(FnBoundary::new(
            |t: f64| 250.0 + 25.0 * (t / 36.0).sin(),
            |_t: f64| 0.0,
        ))
        .build()
}

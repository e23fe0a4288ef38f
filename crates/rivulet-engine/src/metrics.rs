//! Per-run metrics for the time integrator.
//!
//! [`RunMetrics`] is updated after every step and returned by
//! [`TimeIntegrator::run()`](crate::TimeIntegrator::run).

/// Timing and stability figures for one run.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Steps executed so far.
    pub steps_taken: u64,
    /// Snapshots emitted so far (stride hits only; explicit
    /// [`snapshot()`](crate::TimeIntegrator::snapshot) calls are not counted).
    pub snapshots_emitted: u64,
    /// Wall-clock time of the most recent step.
    pub last_step_us: u64,
    /// Cumulative wall-clock time spent stepping.
    pub total_step_us: u64,
    /// Courant number `|A| dt / dx` (hyperbolic runs).
    pub courant_number: Option<f64>,
    /// Diffusion number `B dt / dx^2` (parabolic runs).
    pub diffusion_number: Option<f64>,
    /// Largest absolute state value after the most recent step.
    pub max_abs_value: f64,
}

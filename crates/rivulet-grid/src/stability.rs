//! Stability bounds for the explicit schemes.
//!
//! Both schemes are explicit, so their timestep is capped by a
//! dimensionless number:
//!
//! ```text
//! Courant number    nu = |A| dt / dx    <= 1     (Lax-Friedrichs)
//! diffusion number  r  =  B  dt / dx^2  <= 1/2   (FTCS)
//! ```
//!
//! A configuration that violates either bound is rejected with
//! [`ConfigError::UnstableConfiguration`] before any step runs.

use rivulet_core::{ConfigError, StabilityCriterion};

/// Upper bound on the Courant number.
pub const COURANT_LIMIT: f64 = 1.0;

/// Upper bound on the diffusion number.
pub const DIFFUSION_LIMIT: f64 = 0.5;

/// Relative slack when comparing against a limit, so that a fraction of
/// exactly 1.0 is not rejected by rounding in `dx * f / |A|`.
const LIMIT_TOLERANCE: f64 = 1e-12;

/// Stateless stability calculations shared by the discretization
/// strategies.
///
/// # Examples
///
/// ```
/// use rivulet_grid::StabilityAnalyzer;
///
/// // A=3, dx=2.5, dt=2: Courant 2.4 is rejected.
/// assert!(StabilityAnalyzer::check_courant(3.0, 2.0, 2.5).is_err());
///
/// // Half the critical Courant number is accepted.
/// let dt = StabilityAnalyzer::hyperbolic_dt(3.0, 2.5, 0.5).unwrap();
/// assert!(StabilityAnalyzer::check_courant(3.0, dt, 2.5).is_ok());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StabilityAnalyzer;

impl StabilityAnalyzer {
    /// `|A| dt / dx`.
    pub fn courant_number(advection: f64, dt: f64, dx: f64) -> f64 {
        advection.abs() * dt / dx
    }

    /// `B dt / dx^2`.
    pub fn diffusion_number(diffusion: f64, dt: f64, dx: f64) -> f64 {
        diffusion * dt / (dx * dx)
    }

    /// Critical Courant ratio `dt/dx = 1/|A|`.
    ///
    /// Returns `Err(ConfigError::InvalidCoefficient)` if `A == 0`.
    pub fn critical_lambda(advection: f64) -> Result<f64, ConfigError> {
        if advection == 0.0 {
            return Err(ConfigError::InvalidCoefficient {
                name: "A",
                value: advection,
                reason: "critical Courant number 1/|A| is undefined for A = 0",
            });
        }
        Ok(1.0 / advection.abs())
    }

    /// Timestep `dt = dx * fraction / |A|` for the hyperbolic scheme.
    ///
    /// `fraction` is the share of the critical Courant number to use and
    /// must be finite and positive. Values above 1 produce an unstable
    /// `dt`, which [`check_courant`](Self::check_courant) rejects.
    pub fn hyperbolic_dt(advection: f64, dx: f64, fraction: f64) -> Result<f64, ConfigError> {
        check_positive("courant_fraction", fraction)?;
        Ok(dx * fraction * Self::critical_lambda(advection)?)
    }

    /// Timestep `dt = safety * dx^2 / B` for the parabolic scheme.
    ///
    /// Returns `Err(ConfigError::InvalidCoefficient)` unless `B > 0`.
    pub fn parabolic_dt(diffusion: f64, dx: f64, safety: f64) -> Result<f64, ConfigError> {
        check_positive("safety_factor", safety)?;
        check_diffusivity(diffusion)?;
        Ok(safety * dx * dx / diffusion)
    }

    /// Validate a `(dt, dx)` pair against the Courant bound.
    ///
    /// Returns the Courant number on success.
    pub fn check_courant(advection: f64, dt: f64, dx: f64) -> Result<f64, ConfigError> {
        check_limit(
            StabilityCriterion::Courant,
            Self::courant_number(advection, dt, dx),
            COURANT_LIMIT,
        )
    }

    /// Validate a `(dt, dx)` pair against the diffusion-number bound.
    ///
    /// Returns the diffusion number on success.
    pub fn check_diffusion(diffusion: f64, dt: f64, dx: f64) -> Result<f64, ConfigError> {
        check_limit(
            StabilityCriterion::Diffusion,
            Self::diffusion_number(diffusion, dt, dx),
            DIFFUSION_LIMIT,
        )
    }

    /// Number of interior nodes allowed by `dx <= 2B/|A|` on a domain of
    /// the given length: `floor(|A| L / (2B)) - 1` (minimum 0) plus one.
    ///
    /// Returns `Err(ConfigError::InvalidCoefficient)` if `A == 0` (the
    /// bound does not constrain the grid) or `B <= 0`.
    pub fn critical_cell_count(
        advection: f64,
        diffusion: f64,
        length: f64,
    ) -> Result<usize, ConfigError> {
        check_diffusivity(diffusion)?;
        if advection == 0.0 {
            return Err(ConfigError::InvalidCoefficient {
                name: "A",
                value: advection,
                reason: "dx <= 2B/|A| does not bound the grid when A = 0; use a fixed cell count",
            });
        }
        let max_interior = ((advection.abs() * length / (2.0 * diffusion)).floor() - 1.0).max(0.0);
        if max_interior >= crate::GridSpec::MAX_CELLS as f64 {
            return Err(ConfigError::InvalidParameter {
                name: "cell_count",
                reason: format!("critical grid of {max_interior} cells is too large"),
            });
        }
        Ok(max_interior as usize + 1)
    }
}

fn check_limit(criterion: StabilityCriterion, value: f64, limit: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() || value > limit * (1.0 + LIMIT_TOLERANCE) {
        return Err(ConfigError::UnstableConfiguration {
            criterion,
            value,
            limit,
        });
    }
    Ok(value)
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be finite and positive, got {value}"),
        });
    }
    Ok(())
}

fn check_diffusivity(diffusion: f64) -> Result<(), ConfigError> {
    if diffusion.is_nan() || diffusion <= 0.0 {
        return Err(ConfigError::InvalidCoefficient {
            name: "B",
            value: diffusion,
            reason: "diffusivity must be positive; it divides the stability bound",
        });
    }
    Ok(())
}

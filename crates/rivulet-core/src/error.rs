//! Error types for the Rivulet engine.
//!
//! Split by the moment of detection: [`ConfigError`] covers everything
//! caught while resolving the discretization and assembling the stencil
//! (before any step executes); [`StepError`] covers failures raised by
//! the integrator at call time.

use std::error::Error;
use std::fmt;

/// Which stability bound a configuration violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StabilityCriterion {
    /// Courant number `|A| dt / dx`, bounded by 1 (hyperbolic).
    Courant,
    /// Diffusion number `B dt / dx^2`, bounded by 0.5 (parabolic).
    Diffusion,
}

impl fmt::Display for StabilityCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Courant => write!(f, "Courant number"),
            Self::Diffusion => write!(f, "diffusion number"),
        }
    }
}

/// Errors detected while configuring a run.
///
/// All variants are raised before the first step; a run that fails
/// configuration never starts integrating.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A coefficient is zero (or otherwise unusable) where the scheme's
    /// stability formula divides by it.
    InvalidCoefficient {
        /// Coefficient name (`"A"`, `"B"` or `"C"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Why the value is unusable.
        reason: &'static str,
    },
    /// The Courant or diffusion number exceeds its stability bound.
    UnstableConfiguration {
        /// The violated criterion.
        criterion: StabilityCriterion,
        /// The computed number.
        value: f64,
        /// The bound it must not exceed.
        limit: f64,
    },
    /// The grid has fewer than two solved cells.
    DegenerateGrid {
        /// The derived or requested cell count.
        cell_count: i64,
    },
    /// A scalar parameter is out of range (bounds, horizon, stride, ...).
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the violation.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoefficient {
                name,
                value,
                reason,
            } => write!(f, "invalid coefficient {name}={value}: {reason}"),
            Self::UnstableConfiguration {
                criterion,
                value,
                limit,
            } => write!(f, "unstable configuration: {criterion} {value} exceeds {limit}"),
            Self::DegenerateGrid { cell_count } => {
                write!(f, "degenerate grid: {cell_count} cells (need at least 2)")
            }
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter {name}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors raised by the integrator while stepping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A step was requested after the configured step count was reached.
    IntegratorCompleted {
        /// The configured step count.
        step_count: u64,
    },
    /// A non-finite value appeared in the state vector (divergence guard).
    NumericalDivergence {
        /// The step that produced the value.
        step: u64,
        /// Index of the first non-finite cell.
        cell_index: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegratorCompleted { step_count } => {
                write!(f, "integrator completed all {step_count} steps")
            }
            Self::NumericalDivergence { step, cell_index } => {
                write!(f, "non-finite value at cell {cell_index} after step {step}")
            }
        }
    }
}

impl Error for StepError {}

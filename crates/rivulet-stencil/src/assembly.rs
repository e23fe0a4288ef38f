//! Stencil assembly for the two equation families.
//!
//! Hyperbolic, Lax-Friedrichs for `U_t + A U_x + B U = f`, with
//! `nu = A dt / dx`:
//! ```text
//! M[i][i]   = -B dt
//! M[i][i-1] = 0.5 + 0.5 nu
//! M[i][i+1] = 0.5 - 0.5 nu
//! ```
//! The neighbour average replaces the point value, so there is no
//! identity term on the diagonal.
//!
//! Parabolic, FTCS for `U_t + A U_x = B U_xx - C U`, with
//! `r = B dt / dx^2` and `p = A dt / (2 dx)`:
//! ```text
//! M[i][i]   = 1 - 2r - C dt
//! M[i][i-1] = r + p
//! M[i][i+1] = r - p
//! ```

use rivulet_core::EquationCoefficients;
use rivulet_grid::{BoundaryPolicy, Discretization, GridSpec, SchemeKind};

use crate::operator::{Corners, NeighbourWeights, UpdateOperator};

/// Builds [`UpdateOperator`]s.
///
/// Assembly is pure: identical inputs produce bit-identical operators.
#[derive(Clone, Copy, Debug, Default)]
pub struct StencilAssembler;

impl StencilAssembler {
    /// Assemble the operator for a resolved discretization of `scheme`.
    pub fn assemble(
        scheme: &SchemeKind,
        coefficients: &EquationCoefficients,
        discretization: &Discretization,
    ) -> UpdateOperator {
        let grid = &discretization.grid;
        let dt = discretization.time.dt;
        match scheme {
            SchemeKind::Hyperbolic(h) => {
                Self::lax_friedrichs(coefficients, grid, dt, h.boundary_policy)
            }
            SchemeKind::Parabolic(_) => Self::ftcs(coefficients, grid, dt),
        }
    }

    /// Lax-Friedrichs operator with the given edge policy.
    pub fn lax_friedrichs(
        coefficients: &EquationCoefficients,
        grid: &GridSpec,
        dt: f64,
        policy: BoundaryPolicy,
    ) -> UpdateOperator {
        let n = grid.cell_count();
        let nu = coefficients.advection * dt / grid.spacing();
        let weights = NeighbourWeights {
            west: 0.5 + 0.5 * nu,
            east: 0.5 - 0.5 * nu,
        };
        let mut sub = vec![weights.west; n - 1];
        let diag = vec![-coefficients.decay_or_diffusion * dt; n];
        let mut sup = vec![weights.east; n - 1];

        match policy {
            BoundaryPolicy::OneSided => {
                UpdateOperator::from_bands(sub, diag, sup, weights)
            }
            BoundaryPolicy::Periodic => UpdateOperator::from_bands(sub, diag, sup, weights)
                .with_corners(Corners {
                    top_right: weights.west,
                    bottom_left: weights.east,
                }),
            BoundaryPolicy::Reflective => {
                // Ghost cells mirror the first interior neighbour, so each
                // edge row collects both neighbour weights on one entry.
                let folded = weights.west + weights.east;
                sup[0] = folded;
                sub[n - 2] = folded;
                UpdateOperator::from_bands(sub, diag, sup, weights)
            }
        }
    }

    /// FTCS operator on the interior nodes of a boundary-value problem.
    pub fn ftcs(coefficients: &EquationCoefficients, grid: &GridSpec, dt: f64) -> UpdateOperator {
        let n = grid.cell_count();
        let dx = grid.spacing();
        let r = coefficients.decay_or_diffusion * dt / (dx * dx);
        let p = coefficients.advection * dt / (2.0 * dx);
        let weights = NeighbourWeights {
            west: r + p,
            east: r - p,
        };
        UpdateOperator::from_bands(
            vec![weights.west; n - 1],
            vec![1.0 - 2.0 * r - coefficients.reaction * dt; n],
            vec![weights.east; n - 1],
            weights,
        )
    }
}

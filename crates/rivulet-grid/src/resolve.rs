//! Discretization strategies: from physical inputs to a stable
//! `(GridSpec, TimeSpec)` pair.

use rivulet_core::{
    ConfigError, Domain, EquationCoefficients, StabilityCriterion, TimeHorizon, TimeSpec,
};

use crate::edge::BoundaryPolicy;
use crate::grid::GridSpec;
use crate::stability::StabilityAnalyzer;

/// A resolved, stability-checked discretization.
#[derive(Clone, Debug, PartialEq)]
pub struct Discretization {
    /// Spatial grid.
    pub grid: GridSpec,
    /// Time discretization.
    pub time: TimeSpec,
    /// The stability bound that governed `dt`.
    pub criterion: StabilityCriterion,
    /// Value of that criterion's number for this run.
    pub stability_number: f64,
}

/// Capability shared by both equation families: resolve a stable
/// discretization from coefficients, domain, and requested horizon.
pub trait ResolveDiscretization {
    /// Resolve the grid and timestep.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]; in particular `UnstableConfiguration` when the
    /// derived timestep breaks the scheme's stability bound.
    fn resolve(
        &self,
        coefficients: &EquationCoefficients,
        domain: Domain,
        horizon: TimeHorizon,
        t0: f64,
    ) -> Result<Discretization, ConfigError>;
}

// ── Hyperbolic ─────────────────────────────────────────────────────

/// Lax-Friedrichs discretization: caller picks the cell count, `dt` is a
/// fraction of the critical Courant step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HyperbolicDiscretization {
    /// Number of grid cells.
    pub cell_count: usize,
    /// Share of the critical Courant number, in `(0, 1]`.
    pub courant_fraction: f64,
    /// Edge-row behavior of the stencil.
    pub boundary_policy: BoundaryPolicy,
}

impl HyperbolicDiscretization {
    /// One-sided edges with the given cell count and Courant fraction.
    pub fn new(cell_count: usize, courant_fraction: f64) -> Self {
        Self {
            cell_count,
            courant_fraction,
            boundary_policy: BoundaryPolicy::default(),
        }
    }

    /// Replace the edge policy.
    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary_policy = policy;
        self
    }
}

impl ResolveDiscretization for HyperbolicDiscretization {
    fn resolve(
        &self,
        coefficients: &EquationCoefficients,
        domain: Domain,
        horizon: TimeHorizon,
        t0: f64,
    ) -> Result<Discretization, ConfigError> {
        coefficients.validate()?;
        let grid = GridSpec::cells(domain, self.cell_count)?;
        let dx = grid.spacing();
        let dt = StabilityAnalyzer::hyperbolic_dt(coefficients.advection, dx, self.courant_fraction)?;
        let nu = StabilityAnalyzer::check_courant(coefficients.advection, dt, dx)?;
        let step_count = horizon.step_count(t0, dt)?;
        Ok(Discretization {
            grid,
            time: TimeSpec { dt, step_count, t0 },
            criterion: StabilityCriterion::Courant,
            stability_number: nu,
        })
    }
}

// ── Parabolic ──────────────────────────────────────────────────────

/// How the parabolic grid size is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GridSizing {
    /// Largest grid allowed by `dx <= 2B/|A|`. Requires `A != 0`.
    #[default]
    Critical,
    /// Explicit number of interior nodes.
    Fixed(usize),
}

/// FTCS discretization of a boundary-value problem: interior node count
/// derived (or fixed), `dt` from a diffusion-number safety factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParabolicDiscretization {
    /// Grid sizing rule.
    pub sizing: GridSizing,
    /// Target diffusion number `B dt / dx^2`; must not exceed 0.5.
    pub safety_factor: f64,
}

impl ParabolicDiscretization {
    /// Critical grid sizing with the given safety factor.
    pub fn new(safety_factor: f64) -> Self {
        Self {
            sizing: GridSizing::Critical,
            safety_factor,
        }
    }

    /// Replace the sizing rule.
    pub fn with_sizing(mut self, sizing: GridSizing) -> Self {
        self.sizing = sizing;
        self
    }
}

impl ResolveDiscretization for ParabolicDiscretization {
    fn resolve(
        &self,
        coefficients: &EquationCoefficients,
        domain: Domain,
        horizon: TimeHorizon,
        t0: f64,
    ) -> Result<Discretization, ConfigError> {
        coefficients.validate()?;
        domain.validate()?;
        let cell_count = match self.sizing {
            GridSizing::Critical => StabilityAnalyzer::critical_cell_count(
                coefficients.advection,
                coefficients.decay_or_diffusion,
                domain.length(),
            )?,
            GridSizing::Fixed(n) => n,
        };
        let grid = GridSpec::interior(domain, cell_count)?;
        let dx = grid.spacing();
        let b = coefficients.decay_or_diffusion;
        let dt = StabilityAnalyzer::parabolic_dt(b, dx, self.safety_factor)?;
        let r = StabilityAnalyzer::check_diffusion(b, dt, dx)?;
        let step_count = horizon.step_count(t0, dt)?;
        Ok(Discretization {
            grid,
            time: TimeSpec { dt, step_count, t0 },
            criterion: StabilityCriterion::Diffusion,
            stability_number: r,
        })
    }
}

// ── SchemeKind ─────────────────────────────────────────────────────

/// The equation family of a run together with its discretization rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SchemeKind {
    /// Transport + decay, Lax-Friedrichs.
    Hyperbolic(HyperbolicDiscretization),
    /// Convection-diffusion(-reaction), FTCS with Dirichlet boundaries.
    Parabolic(ParabolicDiscretization),
}

impl SchemeKind {
    /// Edge policy for hyperbolic runs; `None` for parabolic runs, whose
    /// edges are always Dirichlet boundaries.
    pub fn boundary_policy(&self) -> Option<BoundaryPolicy> {
        match self {
            Self::Hyperbolic(h) => Some(h.boundary_policy),
            Self::Parabolic(_) => None,
        }
    }
}

impl ResolveDiscretization for SchemeKind {
    fn resolve(
        &self,
        coefficients: &EquationCoefficients,
        domain: Domain,
        horizon: TimeHorizon,
        t0: f64,
    ) -> Result<Discretization, ConfigError> {
        match self {
            Self::Hyperbolic(h) => h.resolve(coefficients, domain, horizon, t0),
            Self::Parabolic(p) => p.resolve(coefficients, domain, horizon, t0),
        }
    }
}

/// Resolve the discretization of `scheme`.
///
/// # Examples
///
/// ```
/// use rivulet_core::{Domain, EquationCoefficients, TimeHorizon};
/// use rivulet_grid::{resolve_discretization, ParabolicDiscretization, SchemeKind};
///
/// let coeffs = EquationCoefficients::new(1.0, 5.0, 0.0).unwrap();
/// let domain = Domain::new(0.0, 1000.0).unwrap();
/// let scheme = SchemeKind::Parabolic(ParabolicDiscretization::new(0.1));
/// let d = resolve_discretization(&coeffs, domain, TimeHorizon::Until(3600.0), 0.0, &scheme)
///     .unwrap();
/// assert_eq!(d.grid.cell_count(), 100);
/// ```
pub fn resolve_discretization(
    coefficients: &EquationCoefficients,
    domain: Domain,
    horizon: TimeHorizon,
    t0: f64,
    scheme: &SchemeKind,
) -> Result<Discretization, ConfigError> {
    scheme.resolve(coefficients, domain, horizon, t0)
}

//! Run configuration and validation.
//!
//! [`RunConfig`] is the complete, explicit input of one run: there is no
//! process-wide state. [`validate()`](RunConfig::validate) checks the
//! structural invariants; [`resolve()`](RunConfig::resolve) additionally
//! derives the stable discretization. Both run before any step executes.

use std::fmt;

use rivulet_core::{
    BoundaryProvider, ConfigError, Domain, EquationCoefficients, SourceTerm, TimeHorizon,
};
use rivulet_grid::{BoundaryPolicy, Discretization, ResolveDiscretization, SchemeKind};

/// Initial condition `U(x, t0)`, sampled at every node position.
pub type InitialCondition = Box<dyn Fn(f64) -> f64 + Send>;

/// Default emission stride: every step.
pub const DEFAULT_EMIT_EVERY: u64 = 1;

// ── RunConfig ──────────────────────────────────────────────────────

/// Complete configuration of one integration run.
///
/// Consumed by [`TimeIntegrator::new()`](crate::TimeIntegrator::new).
pub struct RunConfig {
    /// Physical extent of the domain.
    pub domain: Domain,
    /// PDE coefficients `A`, `B`, `C`.
    pub coefficients: EquationCoefficients,
    /// Equation family and discretization rule.
    pub scheme: SchemeKind,
    /// Requested run length.
    pub horizon: TimeHorizon,
    /// Initial time.
    pub t0: f64,
    /// Emit a snapshot when the zero-based step index is a multiple of
    /// this stride (1 = every step). Must be at least 1.
    pub emit_every: u64,
    /// Initial condition.
    pub initial_condition: InitialCondition,
    /// Dirichlet boundary values. Parabolic runs without a provider use
    /// zero at both ends.
    pub boundary: Option<Box<dyn BoundaryProvider>>,
    /// Source term, scaled by `dt` each step.
    pub source: Option<Box<dyn SourceTerm>>,
    /// Halt with `StepError::NumericalDivergence` when a non-finite value
    /// appears in the state.
    pub divergence_guard: bool,
}

impl RunConfig {
    /// Start a builder.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Check structural invariants without resolving the discretization.
    ///
    /// # Errors
    ///
    /// - coefficients or domain invalid
    /// - `t0` not finite
    /// - `emit_every == 0`
    /// - a boundary provider combined with a hyperbolic policy other than
    ///   [`BoundaryPolicy::OneSided`] (the edge rows already close the
    ///   stencil)
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.coefficients.validate()?;
        self.domain.validate()?;
        if !self.t0.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "t0",
                reason: format!("must be finite, got {}", self.t0),
            });
        }
        if self.emit_every == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "emit_every",
                reason: "stride must be at least 1".to_string(),
            });
        }
        if self.boundary.is_some() {
            if let Some(policy) = self.scheme.boundary_policy() {
                if policy != BoundaryPolicy::OneSided {
                    return Err(ConfigError::InvalidParameter {
                        name: "boundary",
                        reason: format!("boundary values cannot be injected under {policy:?} edges"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate and resolve the stable discretization.
    pub fn resolve(&self) -> Result<Discretization, ConfigError> {
        self.validate()?;
        self.scheme
            .resolve(&self.coefficients, self.domain, self.horizon, self.t0)
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("domain", &self.domain)
            .field("coefficients", &self.coefficients)
            .field("scheme", &self.scheme)
            .field("horizon", &self.horizon)
            .field("t0", &self.t0)
            .field("emit_every", &self.emit_every)
            .field("boundary", &self.boundary.is_some())
            .field("source", &self.source.is_some())
            .field("divergence_guard", &self.divergence_guard)
            .finish_non_exhaustive()
    }
}

// ── RunConfigBuilder ───────────────────────────────────────────────

/// Builder for [`RunConfig`].
///
/// Required: `domain`, `coefficients`, `scheme`, `horizon`. Defaults:
/// `t0 = 0`, stride 1, zero initial condition, no boundary provider, no
/// source, divergence guard off.
///
/// # Examples
///
/// ```
/// use rivulet_core::{Domain, EquationCoefficients, TimeHorizon};
/// use rivulet_engine::RunConfig;
/// use rivulet_grid::{HyperbolicDiscretization, SchemeKind};
///
/// let config = RunConfig::builder()
///     .domain(Domain::new(0.0, 1000.0).unwrap())
///     .coefficients(EquationCoefficients::new(3.0, 0.001, 0.0).unwrap())
///     .scheme(SchemeKind::Hyperbolic(HyperbolicDiscretization::new(400, 0.5)))
///     .horizon(TimeHorizon::Steps(3600))
///     .emit_every(5)
///     .initial_condition(|x| 7.0 + 2.0 * (x * std::f64::consts::PI / 1000.0).sin())
///     .build()
///     .unwrap();
/// assert_eq!(config.emit_every, 5);
/// ```
pub struct RunConfigBuilder {
    domain: Option<Domain>,
    coefficients: Option<EquationCoefficients>,
    scheme: Option<SchemeKind>,
    horizon: Option<TimeHorizon>,
    t0: f64,
    emit_every: u64,
    initial_condition: InitialCondition,
    boundary: Option<Box<dyn BoundaryProvider>>,
    source: Option<Box<dyn SourceTerm>>,
    divergence_guard: bool,
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self {
            domain: None,
            coefficients: None,
            scheme: None,
            horizon: None,
            t0: 0.0,
            emit_every: DEFAULT_EMIT_EVERY,
            initial_condition: Box::new(|_| 0.0),
            boundary: None,
            source: None,
            divergence_guard: false,
        }
    }
}

impl RunConfigBuilder {
    /// Set the domain.
    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Set the PDE coefficients.
    pub fn coefficients(mut self, coefficients: EquationCoefficients) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    /// Set the scheme.
    pub fn scheme(mut self, scheme: SchemeKind) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Set the run length.
    pub fn horizon(mut self, horizon: TimeHorizon) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Set the initial time (default 0).
    pub fn t0(mut self, t0: f64) -> Self {
        self.t0 = t0;
        self
    }

    /// Set the emission stride (default 1).
    pub fn emit_every(mut self, stride: u64) -> Self {
        self.emit_every = stride;
        self
    }

    /// Set the initial condition (default zero everywhere).
    pub fn initial_condition(mut self, f: impl Fn(f64) -> f64 + Send + 'static) -> Self {
        self.initial_condition = Box::new(f);
        self
    }

    /// Set the boundary provider.
    pub fn boundary(mut self, provider: impl BoundaryProvider + 'static) -> Self {
        self.boundary = Some(Box::new(provider));
        self
    }

    /// Set the source term.
    pub fn source(mut self, source: impl SourceTerm + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Enable or disable the divergence guard (default off).
    pub fn divergence_guard(mut self, enabled: bool) -> Self {
        self.divergence_guard = enabled;
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` if a required field is missing, or
    /// any error from [`RunConfig::validate()`].
    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let config = RunConfig {
            domain: self.domain.ok_or_else(|| missing("domain"))?,
            coefficients: self.coefficients.ok_or_else(|| missing("coefficients"))?,
            scheme: self.scheme.ok_or_else(|| missing("scheme"))?,
            horizon: self.horizon.ok_or_else(|| missing("horizon"))?,
            t0: self.t0,
            emit_every: self.emit_every,
            initial_condition: self.initial_condition,
            boundary: self.boundary,
            source: self.source,
            divergence_guard: self.divergence_guard,
        };
        config.validate()?;
        Ok(config)
    }
}

fn missing(name: &'static str) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: "is required".to_string(),
    }
}

//! Equation coefficients and the spatial domain extent.

use crate::error::ConfigError;

/// Constant coefficients of the scalar PDE.
///
/// The same triple serves both equation families:
///
/// ```text
/// hyperbolic:  U_t + A U_x + B U = f(x, t)
/// parabolic:   U_t + A U_x = B U_xx - C U
/// ```
///
/// `decay_or_diffusion` is the decay rate in the hyperbolic family and
/// the diffusivity in the parabolic one. `reaction` is only read by the
/// parabolic stencil.
///
/// # Examples
///
/// ```
/// use rivulet_core::EquationCoefficients;
///
/// let c = EquationCoefficients::new(1.0, 5.0, 0.0).unwrap();
/// assert_eq!(c.advection, 1.0);
/// assert!(EquationCoefficients::new(f64::NAN, 5.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquationCoefficients {
    /// Advection speed `A`.
    pub advection: f64,
    /// Decay rate (hyperbolic) or diffusivity (parabolic) `B`.
    pub decay_or_diffusion: f64,
    /// Reaction rate `C` (parabolic only).
    pub reaction: f64,
}

impl EquationCoefficients {
    /// Create a coefficient triple, rejecting non-finite values.
    pub fn new(advection: f64, decay_or_diffusion: f64, reaction: f64) -> Result<Self, ConfigError> {
        let c = Self {
            advection,
            decay_or_diffusion,
            reaction,
        };
        c.validate()?;
        Ok(c)
    }

    /// Check that every coefficient is finite.
    ///
    /// Scheme-specific constraints (non-zero `A`, positive `B`) are
    /// checked by the discretization strategies, not here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("A", self.advection),
            ("B", self.decay_or_diffusion),
            ("C", self.reaction),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidCoefficient {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }
}

/// Physical extent `[lower, upper]` of the 1D domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl Domain {
    /// Create a domain, requiring finite bounds with `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        let d = Self { lower, upper };
        d.validate()?;
        Ok(d)
    }

    /// Check the bounds invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "domain",
                reason: format!("bounds must be finite, got [{}, {}]", self.lower, self.upper),
            });
        }
        if self.lower >= self.upper {
            return Err(ConfigError::InvalidParameter {
                name: "domain",
                reason: format!("lower {} must be below upper {}", self.lower, self.upper),
            });
        }
        Ok(())
    }

    /// Length `upper - lower`.
    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }
}

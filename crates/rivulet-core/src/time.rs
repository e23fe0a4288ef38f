//! Time discretization: [`TimeSpec`] and the requested [`TimeHorizon`].

use crate::error::ConfigError;

/// How long a run lasts, as requested by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeHorizon {
    /// A fixed number of steps.
    Steps(u64),
    /// Integrate until at least this physical time.
    Until(f64),
}

impl TimeHorizon {
    /// Resolve the horizon into a step count for the given `t0` and `dt`.
    ///
    /// `Until(t_final)` yields `floor((t_final - t0) / dt) + 1` steps, so
    /// the final time always reaches or passes `t_final`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rivulet_core::TimeHorizon;
    ///
    /// assert_eq!(TimeHorizon::Steps(3600).step_count(0.0, 0.5).unwrap(), 3600);
    /// assert_eq!(TimeHorizon::Until(10.0).step_count(0.0, 3.0).unwrap(), 4);
    /// ```
    pub fn step_count(&self, t0: f64, dt: f64) -> Result<u64, ConfigError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "dt",
                reason: format!("must be finite and positive, got {dt}"),
            });
        }
        match *self {
            Self::Steps(0) => Err(ConfigError::InvalidParameter {
                name: "horizon",
                reason: "step count must be at least 1".to_string(),
            }),
            Self::Steps(n) => Ok(n),
            Self::Until(t_final) => {
                if !t_final.is_finite() || !t0.is_finite() || t_final <= t0 {
                    return Err(ConfigError::InvalidParameter {
                        name: "horizon",
                        reason: format!("final time {t_final} must be finite and after t0 {t0}"),
                    });
                }
                let steps = ((t_final - t0) / dt).floor() + 1.0;
                if steps >= u64::MAX as f64 {
                    return Err(ConfigError::InvalidParameter {
                        name: "horizon",
                        reason: format!("{steps} steps overflows the step counter"),
                    });
                }
                Ok(steps as u64)
            }
        }
    }
}

/// Resolved time discretization for one run.
///
/// `dt` is always derived by the stability analysis, never chosen by the
/// caller directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSpec {
    /// Timestep.
    pub dt: f64,
    /// Number of steps the integrator executes.
    pub step_count: u64,
    /// Initial time.
    pub t0: f64,
}

impl TimeSpec {
    /// Time reached after all steps: `t0 + step_count * dt`.
    pub fn end_time(&self) -> f64 {
        self.t0 + self.step_count as f64 * self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_steps_rejected() {
        assert!(matches!(
            TimeHorizon::Steps(0).step_count(0.0, 1.0),
            Err(ConfigError::InvalidParameter { name: "horizon", .. })
        ));
    }

    #[test]
    fn until_before_start_rejected() {
        assert!(TimeHorizon::Until(1.0).step_count(2.0, 0.1).is_err());
        assert!(TimeHorizon::Until(2.0).step_count(2.0, 0.1).is_err());
    }

    #[test]
    fn non_positive_dt_rejected() {
        assert!(TimeHorizon::Steps(5).step_count(0.0, 0.0).is_err());
        assert!(TimeHorizon::Steps(5).step_count(0.0, f64::NAN).is_err());
    }

    #[test]
    fn exact_multiple_takes_one_extra_step() {
        // (3600 - 0) / 0.5 = 7200 exactly; floor + 1.
        assert_eq!(TimeHorizon::Until(3600.0).step_count(0.0, 0.5).unwrap(), 7201);
    }

    #[test]
    fn end_time() {
        let spec = TimeSpec {
            dt: 0.25,
            step_count: 8,
            t0: 1.0,
        };
        assert_eq!(spec.end_time(), 3.0);
    }

    proptest! {
        #[test]
        fn until_horizon_reaches_final_time(
            t0 in -100.0f64..100.0,
            span in 0.001f64..1000.0,
            dt in 0.001f64..10.0,
        ) {
            let t_final = t0 + span;
            let n = TimeHorizon::Until(t_final).step_count(t0, dt).unwrap();
            let spec = TimeSpec { dt, step_count: n, t0 };
            prop_assert!(spec.end_time() >= t_final - 1e-9 * t_final.abs().max(1.0));
            // Never more than one step past the target.
            prop_assert!(spec.end_time() - t_final <= dt + 1e-9 * t_final.abs().max(1.0));
        }
    }
}

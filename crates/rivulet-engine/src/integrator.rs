//! The stepping state machine.
//!
//! [`TimeIntegrator`] owns the live state vector of one run and advances
//! it one step at a time:
//!
//! ```text
//! t      <- t + dt
//! c      <- boundary(t) + dt * source(t)
//! U_new  <- M U_old + c
//! ```
//!
//! Snapshots are emitted when the zero-based index of the step just
//! taken is a multiple of the emission stride. With stride 5 the
//! emitted steps are 1, 6, 11, ...
//!
//! # Ownership model
//!
//! `TimeIntegrator` is [`Send`] but not `Sync`. The state is mutated in
//! place every step, so every [`Snapshot`] is an owned copy.
//!
//! # Laziness
//!
//! [`snapshots()`](TimeIntegrator::snapshots) and
//! [`into_snapshots()`](TimeIntegrator::into_snapshots) compute steps only
//! as snapshots are pulled. Dropping the iterator early leaves the
//! remaining steps uncomputed. A finished run cannot be restarted; build a
//! new integrator instead.

use std::fmt;
use std::iter::FusedIterator;
use std::time::Instant;

use rivulet_core::{
    BoundaryProvider, ConfigError, Snapshot, SnapshotSink, SourceTerm, StabilityCriterion,
    StepError, StepId, TimeSpec,
};
use rivulet_grid::GridSpec;
use rivulet_stencil::{inject_boundary, StencilAssembler, UpdateOperator};

use crate::config::RunConfig;
use crate::metrics::RunMetrics;

// Compile-time assertion: TimeIntegrator is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<TimeIntegrator>();
    }
};

// ── Phase ──────────────────────────────────────────────────────────

/// Lifecycle phase of a [`TimeIntegrator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Operator built, state holds the initial condition, no step taken.
    Initialized,
    /// At least one step taken, more remain.
    Stepping,
    /// All `step_count` steps taken.
    Completed,
    /// Stopped by the divergence guard.
    Halted,
}

// ── StepOutcome ────────────────────────────────────────────────────

/// Result of one successful [`TimeIntegrator::step()`].
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Step just completed (1-based; `StepId(0)` is the initial state).
    pub step: StepId,
    /// Simulation time after the step.
    pub time: f64,
    /// The emitted snapshot, if this step hit the emission stride.
    pub snapshot: Option<Snapshot>,
}

// ── TimeIntegrator ─────────────────────────────────────────────────

/// Drives one run from its initial condition to `step_count` steps.
pub struct TimeIntegrator {
    operator: UpdateOperator,
    grid: GridSpec,
    time_spec: TimeSpec,
    state: Vec<f64>,
    next: Vec<f64>,
    contribution: Vec<f64>,
    time: f64,
    steps_taken: u64,
    emit_every: u64,
    boundary: Option<Box<dyn BoundaryProvider>>,
    source: Option<Box<dyn SourceTerm>>,
    divergence_guard: bool,
    halted: Option<StepError>,
    metrics: RunMetrics,
}

impl TimeIntegrator {
    /// Resolve the discretization of `config`, assemble the operator and
    /// sample the initial condition.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from validation or stability analysis. No step
    /// is executed on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use rivulet_core::{Domain, EquationCoefficients, TimeHorizon};
    /// use rivulet_engine::{RunConfig, TimeIntegrator};
    /// use rivulet_grid::{HyperbolicDiscretization, SchemeKind};
    ///
    /// let config = RunConfig::builder()
    ///     .domain(Domain::new(0.0, 1000.0).unwrap())
    ///     .coefficients(EquationCoefficients::new(3.0, 0.001, 0.0).unwrap())
    ///     .scheme(SchemeKind::Hyperbolic(HyperbolicDiscretization::new(400, 0.5)))
    ///     .horizon(TimeHorizon::Steps(20))
    ///     .emit_every(5)
    ///     .initial_condition(|x| 7.0 + 2.0 * (x * std::f64::consts::PI / 1000.0).sin())
    ///     .build()
    ///     .unwrap();
    /// let mut integrator = TimeIntegrator::new(config).unwrap();
    /// let steps: Vec<u64> = integrator.snapshots().map(|s| s.unwrap().step.0).collect();
    /// assert_eq!(steps, vec![1, 6, 11, 16]);
    /// ```
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        let discretization = config.resolve()?;
        let operator =
            StencilAssembler::assemble(&config.scheme, &config.coefficients, &discretization);
        let initial = discretization.grid.sample(&*config.initial_condition);

        let mut integrator = Self::from_parts(
            discretization.grid,
            discretization.time,
            operator,
            initial,
            config.emit_every,
            config.boundary,
            config.source,
        )?;
        integrator.divergence_guard = config.divergence_guard;
        match discretization.criterion {
            StabilityCriterion::Courant => {
                integrator.metrics.courant_number = Some(discretization.stability_number);
            }
            StabilityCriterion::Diffusion => {
                integrator.metrics.diffusion_number = Some(discretization.stability_number);
            }
        }
        Ok(integrator)
    }

    /// Build an integrator from pre-resolved parts, bypassing stability
    /// analysis. Useful for caller-assembled operators.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the operator dimension or the initial state
    /// length differs from the grid's cell count, if `emit_every == 0`, or
    /// if `time_spec` has a non-positive `dt` or zero steps.
    pub fn from_parts(
        grid: GridSpec,
        time_spec: TimeSpec,
        operator: UpdateOperator,
        initial: Vec<f64>,
        emit_every: u64,
        boundary: Option<Box<dyn BoundaryProvider>>,
        source: Option<Box<dyn SourceTerm>>,
    ) -> Result<Self, ConfigError> {
        let n = grid.cell_count();
        if operator.dim() != n {
            return Err(ConfigError::InvalidParameter {
                name: "operator",
                reason: format!("dimension {} does not match {n} cells", operator.dim()),
            });
        }
        if initial.len() != n {
            return Err(ConfigError::InvalidParameter {
                name: "initial",
                reason: format!("length {} does not match {n} cells", initial.len()),
            });
        }
        if emit_every == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "emit_every",
                reason: "stride must be at least 1".to_string(),
            });
        }
        if !(time_spec.dt.is_finite() && time_spec.dt > 0.0) || time_spec.step_count == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "time_spec",
                reason: format!(
                    "need finite dt > 0 and at least one step, got dt={} steps={}",
                    time_spec.dt, time_spec.step_count
                ),
            });
        }

        let metrics = RunMetrics {
            max_abs_value: max_abs(&initial),
            ..RunMetrics::default()
        };
        Ok(Self {
            operator,
            grid,
            time: time_spec.t0,
            time_spec,
            state: initial,
            next: vec![0.0; n],
            contribution: vec![0.0; n],
            steps_taken: 0,
            emit_every,
            boundary,
            source,
            divergence_guard: false,
            halted: None,
            metrics,
        })
    }

    /// Enable or disable the divergence guard.
    pub fn with_divergence_guard(mut self, enabled: bool) -> Self {
        self.divergence_guard = enabled;
        self
    }

    /// Execute one step.
    ///
    /// # Errors
    ///
    /// - `IntegratorCompleted` once all steps are taken.
    /// - `NumericalDivergence` if the divergence guard finds a non-finite
    ///   value. The integrator is then halted and every later call returns
    ///   the same error.
    pub fn step(&mut self) -> Result<StepOutcome, StepError> {
        if let Some(err) = &self.halted {
            return Err(err.clone());
        }
        if self.steps_taken >= self.time_spec.step_count {
            return Err(StepError::IntegratorCompleted {
                step_count: self.time_spec.step_count,
            });
        }

        let start = Instant::now();
        let index = self.steps_taken;
        let dt = self.time_spec.dt;
        self.time += dt;
        let t = self.time;

        self.contribution.fill(0.0);
        if let Some(boundary) = &self.boundary {
            inject_boundary(
                self.operator.weights(),
                boundary.as_ref(),
                t,
                &mut self.contribution,
            );
        }
        if let Some(source) = &self.source {
            source.accumulate(t, dt, &mut self.contribution);
        }

        self.operator.apply(&self.state, &mut self.next);
        for (u, c) in self.next.iter_mut().zip(&self.contribution) {
            *u += c;
        }
        std::mem::swap(&mut self.state, &mut self.next);
        self.steps_taken += 1;

        let elapsed_us = start.elapsed().as_micros() as u64;
        self.metrics.steps_taken = self.steps_taken;
        self.metrics.last_step_us = elapsed_us;
        self.metrics.total_step_us += elapsed_us;
        self.metrics.max_abs_value = max_abs(&self.state);

        if self.divergence_guard {
            if let Some(cell_index) = self.state.iter().position(|v| !v.is_finite()) {
                let err = StepError::NumericalDivergence {
                    step: self.steps_taken,
                    cell_index,
                };
                self.halted = Some(err.clone());
                return Err(err);
            }
        }

        let snapshot = if index % self.emit_every == 0 {
            self.metrics.snapshots_emitted += 1;
            Some(self.snapshot())
        } else {
            None
        };
        Ok(StepOutcome {
            step: StepId(self.steps_taken),
            time: t,
            snapshot,
        })
    }

    /// Lazy iterator over emitted snapshots, borrowing the integrator.
    ///
    /// Yields at most one `Err`, after which the iterator is exhausted.
    pub fn snapshots(&mut self) -> Snapshots<'_> {
        Snapshots { integrator: self }
    }

    /// Lazy iterator over emitted snapshots, consuming the integrator.
    pub fn into_snapshots(self) -> IntoSnapshots {
        IntoSnapshots { integrator: self }
    }

    /// Step to completion, handing each emitted snapshot to `sink`.
    ///
    /// # Errors
    ///
    /// `IntegratorCompleted` if no steps remain when called, or
    /// `NumericalDivergence` from the guard.
    pub fn run(&mut self, sink: &mut dyn SnapshotSink) -> Result<RunMetrics, StepError> {
        if self.is_finished() {
            // Surfaces the halt or completion error.
            self.step()?;
        }
        while !self.is_finished() {
            if let Some(snapshot) = self.step()?.snapshot {
                sink.accept(snapshot);
            }
        }
        Ok(self.metrics.clone())
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: StepId(self.steps_taken),
            time: self.time,
            values: self.state.clone(),
        }
    }

    /// The live state vector.
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.halted.is_some() {
            Phase::Halted
        } else if self.steps_taken == 0 {
            Phase::Initialized
        } else if self.steps_taken >= self.time_spec.step_count {
            Phase::Completed
        } else {
            Phase::Stepping
        }
    }

    /// Steps executed so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Steps left before completion (zero once halted).
    pub fn remaining_steps(&self) -> u64 {
        if self.halted.is_some() {
            0
        } else {
            self.time_spec.step_count - self.steps_taken
        }
    }

    /// The spatial grid.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// The resolved time discretization.
    pub fn time_spec(&self) -> &TimeSpec {
        &self.time_spec
    }

    /// The constant update operator.
    pub fn operator(&self) -> &UpdateOperator {
        &self.operator
    }

    /// Boundary plus source contribution added in the most recent step
    /// (all zeros before the first step).
    pub fn last_contribution(&self) -> &[f64] {
        &self.contribution
    }

    /// Metrics accumulated so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    fn is_finished(&self) -> bool {
        self.halted.is_some() || self.steps_taken >= self.time_spec.step_count
    }

    /// Step until the next emitted snapshot. `None` once finished.
    fn next_snapshot(&mut self) -> Option<Result<Snapshot, StepError>> {
        while !self.is_finished() {
            match self.step() {
                Ok(StepOutcome {
                    snapshot: Some(snapshot),
                    ..
                }) => return Some(Ok(snapshot)),
                Ok(_) => {}
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }

    /// Upper bound on iterator items still to come: the remaining
    /// emissions, plus one divergence error when the guard is on.
    fn remaining_emissions(&self) -> usize {
        if self.is_finished() {
            return 0;
        }
        // Indices steps_taken..step_count that are multiples of the stride.
        let first = self.steps_taken.div_ceil(self.emit_every) * self.emit_every;
        let end = self.time_spec.step_count;
        let count = if first >= end {
            0
        } else {
            (end - 1 - first) / self.emit_every + 1
        };
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        if self.divergence_guard {
            count.saturating_add(1)
        } else {
            count
        }
    }
}

impl fmt::Debug for TimeIntegrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeIntegrator")
            .field("grid", &self.grid)
            .field("time_spec", &self.time_spec)
            .field("time", &self.time)
            .field("steps_taken", &self.steps_taken)
            .field("emit_every", &self.emit_every)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0f64, |m, v| m.max(v.abs()))
}

// ── Snapshot iterators ─────────────────────────────────────────────

/// Borrowing snapshot iterator from [`TimeIntegrator::snapshots()`].
#[derive(Debug)]
pub struct Snapshots<'a> {
    integrator: &'a mut TimeIntegrator,
}

impl Iterator for Snapshots<'_> {
    type Item = Result<Snapshot, StepError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.integrator.next_snapshot()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.integrator.remaining_emissions()))
    }
}

impl FusedIterator for Snapshots<'_> {}

/// Owning snapshot iterator from [`TimeIntegrator::into_snapshots()`].
#[derive(Debug)]
pub struct IntoSnapshots {
    integrator: TimeIntegrator,
}

impl IntoSnapshots {
    /// The underlying integrator.
    pub fn integrator(&self) -> &TimeIntegrator {
        &self.integrator
    }
}

impl Iterator for IntoSnapshots {
    type Item = Result<Snapshot, StepError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.integrator.next_snapshot()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.integrator.remaining_emissions()))
    }
}

impl FusedIterator for IntoSnapshots {}

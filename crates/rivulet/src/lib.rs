//! Rivulet: explicit finite-difference solvers for 1D transport and
//! convection-diffusion equations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Rivulet sub-crates. For most users, adding `rivulet` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rivulet::prelude::*;
//!
//! let config = RunConfig::builder()
//!     .domain(Domain::new(0.0, 1000.0).unwrap())
//!     .coefficients(EquationCoefficients::new(1.0, 5.0, 0.0).unwrap())
//!     .scheme(SchemeKind::Parabolic(ParabolicDiscretization::new(0.1)))
//!     .horizon(TimeHorizon::Until(3600.0))
//!     .emit_every(5)
//!     .initial_condition(|x| 250.0 - 0.25 * x)
//!     .boundary(FnBoundary::new(
//!         |t: f64| 250.0 + 25.0 * (t / 36.0).sin(),
//!         |_t: f64| 0.0,
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let mut integrator = TimeIntegrator::new(config).unwrap();
//! assert_eq!(integrator.grid().cell_count(), 100);
//!
//! // Pull the first three emitted snapshots; later steps never run.
//! let first: Vec<Snapshot> = integrator
//!     .snapshots()
//!     .take(3)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(first[2].step, StepId(11));
//! assert_eq!(integrator.steps_taken(), 11);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rivulet-core` | Coefficients, domain, horizon, errors, snapshots, traits |
//! | [`grid`] | `rivulet-grid` | Grids, stability analysis, discretization |
//! | [`stencil`] | `rivulet-stencil` | Update operator, assembly, boundaries, sources |
//! | [`engine`] | `rivulet-engine` | Run config, integrator, sinks, batched runs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`rivulet-core`).
///
/// Holds the error enums and the three injection points of the stepping
/// loop: [`types::BoundaryProvider`], [`types::SourceTerm`], and
/// [`types::SnapshotSink`].
pub use rivulet_core as types;

/// Grids and stability analysis (`rivulet-grid`).
pub use rivulet_grid as grid;

/// Update operator assembly (`rivulet-stencil`).
///
/// [`stencil::StencilAssembler`] builds the constant
/// [`stencil::UpdateOperator`] of a run.
pub use rivulet_stencil as stencil;

/// Time integration (`rivulet-engine`).
///
/// [`engine::TimeIntegrator`] for a single run, [`engine::BatchedRuns`]
/// for independent runs on scoped threads.
pub use rivulet_engine as engine;

/// Common imports for typical Rivulet usage.
///
/// ```rust
/// use rivulet::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use rivulet_core::{
        BoundaryProvider, Domain, EquationCoefficients, Snapshot, SnapshotSink, SourceTerm,
        StepId, TimeHorizon, TimeSpec,
    };

    // Errors
    pub use rivulet_core::{ConfigError, StabilityCriterion, StepError};

    // Grid
    pub use rivulet_grid::{
        BoundaryPolicy, GridSizing, GridSpec, HyperbolicDiscretization, ParabolicDiscretization,
        SchemeKind,
    };

    // Stencil
    pub use rivulet_stencil::{ConstantBoundary, FnBoundary, PointSource, UpdateOperator};

    // Engine
    pub use rivulet_engine::{
        BatchError, BatchedRuns, Phase, RunConfig, RunMetrics, TimeIntegrator, VecSink,
    };
}

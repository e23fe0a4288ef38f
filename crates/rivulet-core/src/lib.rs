//! Core types and traits for the Rivulet finite-difference engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Rivulet workspace:
//! step identifiers, equation coefficients, the time specification,
//! snapshots, error types, and the forcing/sink traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coefficients;
pub mod error;
pub mod id;
pub mod snapshot;
pub mod time;
pub mod traits;

pub use coefficients::{Domain, EquationCoefficients};
pub use error::{ConfigError, StabilityCriterion, StepError};
pub use id::StepId;
pub use snapshot::Snapshot;
pub use time::{TimeHorizon, TimeSpec};
pub use traits::{BoundaryProvider, SnapshotSink, SourceTerm};

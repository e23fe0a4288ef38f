//! Spatial discretization and stability analysis for Rivulet runs.
//!
//! This crate turns physical inputs (domain, coefficients, time horizon)
//! into a stable `(GridSpec, TimeSpec)` pair.
//!
//! # Strategies
//!
//! - [`HyperbolicDiscretization`]: cell count given, `dt` derived from a
//!   fraction of the critical Courant number.
//! - [`ParabolicDiscretization`]: cell count derived from the cell-Péclet
//!   bound `dx <= 2B/|A|`, `dt` derived from a diffusion-number safety factor.
//!
//! Both implement [`ResolveDiscretization`]; [`SchemeKind`] dispatches
//! between them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod grid;
pub mod resolve;
pub mod stability;

pub use edge::BoundaryPolicy;
pub use grid::{GridLayout, GridSpec};
pub use resolve::{
    resolve_discretization, Discretization, GridSizing, HyperbolicDiscretization,
    ParabolicDiscretization, ResolveDiscretization, SchemeKind,
};
pub use stability::StabilityAnalyzer;

//! Stencil assembly and forcing providers for Rivulet runs.
//!
//! [`StencilAssembler`] builds the constant [`UpdateOperator`] of a run
//! once, from coefficients, grid spacing and timestep. Each step the
//! integrator applies it and adds the forcing contribution built from a
//! [`BoundaryProvider`](rivulet_core::BoundaryProvider) and a
//! [`SourceTerm`](rivulet_core::SourceTerm):
//!
//! ```text
//! U_new = M U_old + boundary(t) + dt * source(t)
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod assembly;
pub mod forcing;
pub mod operator;

pub use assembly::StencilAssembler;
pub use forcing::{inject_boundary, ConstantBoundary, FnBoundary, PointSource};
pub use operator::{Corners, NeighbourWeights, UpdateOperator};

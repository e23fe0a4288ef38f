//! Edge-row behavior of the hyperbolic stencil.

/// How the hyperbolic update treats the first and last grid cells.
///
/// Parabolic runs never consult this: their edge nodes are Dirichlet
/// boundaries injected as forcing.
///
/// | Policy | Row 0 | Row n-1 |
/// |--------|-------|---------|
/// | `OneSided` | only the east neighbour | only the west neighbour |
/// | `Periodic` | west neighbour wraps to cell n-1 | east neighbour wraps to cell 0 |
/// | `Reflective` | ghost cell mirrors cell 1 | ghost cell mirrors cell n-2 |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// Out-of-grid neighbour is omitted. This reproduces the historical
    /// stencil-fill behavior and is kept as the default for compatibility.
    #[default]
    OneSided,
    /// Out-of-grid neighbour wraps to the opposite edge.
    Periodic,
    /// Out-of-grid neighbour mirrors the in-grid neighbour (zero gradient).
    Reflective,
}

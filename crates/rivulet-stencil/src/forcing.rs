//! Boundary providers, point sources, and boundary injection.

use rivulet_core::{BoundaryProvider, SourceTerm};
use smallvec::SmallVec;

use crate::operator::NeighbourWeights;

/// Boundary values given by two closures of simulation time.
///
/// # Examples
///
/// ```
/// use rivulet_core::BoundaryProvider;
/// use rivulet_stencil::FnBoundary;
///
/// let b = FnBoundary::new(|t: f64| 250.0 + 25.0 * (t / 36.0).sin(), |_t: f64| 0.0);
/// assert_eq!(b.left(0.0), 250.0);
/// assert_eq!(b.right(100.0), 0.0);
/// ```
pub struct FnBoundary<L, R> {
    left: L,
    right: R,
}

impl<L, R> FnBoundary<L, R>
where
    L: Fn(f64) -> f64 + Send,
    R: Fn(f64) -> f64 + Send,
{
    /// Wrap the two boundary functions.
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> BoundaryProvider for FnBoundary<L, R>
where
    L: Fn(f64) -> f64 + Send,
    R: Fn(f64) -> f64 + Send,
{
    fn left(&self, t: f64) -> f64 {
        (self.left)(t)
    }

    fn right(&self, t: f64) -> f64 {
        (self.right)(t)
    }
}

/// Time-invariant boundary values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConstantBoundary {
    /// Value at the lower edge.
    pub left: f64,
    /// Value at the upper edge.
    pub right: f64,
}

impl BoundaryProvider for ConstantBoundary {
    fn left(&self, _t: f64) -> f64 {
        self.left
    }

    fn right(&self, _t: f64) -> f64 {
        self.right
    }
}

/// A source term supported on a handful of grid indices.
///
/// Indices outside the grid are ignored when accumulating.
///
/// # Examples
///
/// ```
/// use rivulet_core::SourceTerm;
/// use rivulet_stencil::PointSource;
///
/// let src = PointSource::new([0], |_i: usize, t: f64| 7.0 + (t / 5.0).sin());
/// let mut out = vec![0.0; 3];
/// src.accumulate(0.0, 2.0, &mut out);
/// assert_eq!(out, vec![14.0, 0.0, 0.0]);
/// ```
pub struct PointSource<F> {
    indices: SmallVec<[usize; 4]>,
    f: F,
}

impl<F> PointSource<F>
where
    F: Fn(usize, f64) -> f64 + Send,
{
    /// Force the given indices with `f(index, t)`. Duplicates are removed.
    pub fn new(indices: impl IntoIterator<Item = usize>, f: F) -> Self {
        let mut indices: SmallVec<[usize; 4]> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self { indices, f }
    }

    /// The forced indices, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<F> SourceTerm for PointSource<F>
where
    F: Fn(usize, f64) -> f64 + Send,
{
    fn value(&self, index: usize, t: f64) -> f64 {
        if self.indices.binary_search(&index).is_ok() {
            (self.f)(index, t)
        } else {
            0.0
        }
    }

    fn accumulate(&self, t: f64, scale: f64, out: &mut [f64]) {
        for &i in &self.indices {
            if let Some(v) = out.get_mut(i) {
                *v += scale * (self.f)(i, t);
            }
        }
    }
}

/// Add the Dirichlet boundary contribution at time `t` into `out`:
/// `out[0] += west * left(t)` and `out[n-1] += east * right(t)`.
pub fn inject_boundary(
    weights: NeighbourWeights,
    provider: &dyn BoundaryProvider,
    t: f64,
    out: &mut [f64],
) {
    let Some(last) = out.len().checked_sub(1) else {
        return;
    };
    out[0] += weights.west * provider.left(t);
    out[last] += weights.east * provider.right(t);
}

//! Banded update operator `M` of `U_new = M U_old + forcing`.

/// Interior stencil weights of the west (`x-1`) and east (`x+1`)
/// neighbours.
///
/// Boundary injection scales the left boundary value by `west` and the
/// right one by `east`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighbourWeights {
    /// Weight of `U(x-1)`: the subdiagonal value.
    pub west: f64,
    /// Weight of `U(x+1)`: the superdiagonal value.
    pub east: f64,
}

/// Wraparound entries of a periodic operator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corners {
    /// `M[0][n-1]`.
    pub top_right: f64,
    /// `M[n-1][0]`.
    pub bottom_left: f64,
}

/// A square `n x n` operator stored as three diagonals plus optional
/// periodic corners.
///
/// Built once per run and constant across all steps.
///
/// # Examples
///
/// ```
/// use rivulet_stencil::{NeighbourWeights, UpdateOperator};
///
/// let weights = NeighbourWeights { west: 0.25, east: 0.25 };
/// let m = UpdateOperator::from_bands(vec![0.25; 2], vec![0.5; 3], vec![0.25; 2], weights);
/// let mut out = vec![0.0; 3];
/// m.apply(&[4.0, 4.0, 4.0], &mut out);
/// assert_eq!(out, vec![3.0, 4.0, 3.0]);
/// assert!(m.is_tridiagonal());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateOperator {
    sub: Vec<f64>,
    diag: Vec<f64>,
    sup: Vec<f64>,
    corners: Option<Corners>,
    weights: NeighbourWeights,
}

impl UpdateOperator {
    /// Build a tridiagonal operator from its bands.
    ///
    /// `sub[i] = M[i+1][i]`, `diag[i] = M[i][i]`, `sup[i] = M[i][i+1]`.
    ///
    /// # Panics
    ///
    /// Panics if `diag.len() < 2` or the off-diagonals are not one
    /// shorter than `diag`.
    pub fn from_bands(
        sub: Vec<f64>,
        diag: Vec<f64>,
        sup: Vec<f64>,
        weights: NeighbourWeights,
    ) -> Self {
        let n = diag.len();
        assert!(n >= 2, "operator dimension {n} below 2");
        assert_eq!(sub.len(), n - 1, "subdiagonal length");
        assert_eq!(sup.len(), n - 1, "superdiagonal length");
        Self {
            sub,
            diag,
            sup,
            corners: None,
            weights,
        }
    }

    /// Attach periodic wraparound entries.
    pub fn with_corners(mut self, corners: Corners) -> Self {
        self.corners = Some(corners);
        self
    }

    /// Dimension `n`.
    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    /// Main diagonal.
    pub fn diag(&self) -> &[f64] {
        &self.diag
    }

    /// Subdiagonal, `sub[i] = M[i+1][i]`.
    pub fn sub(&self) -> &[f64] {
        &self.sub
    }

    /// Superdiagonal, `sup[i] = M[i][i+1]`.
    pub fn sup(&self) -> &[f64] {
        &self.sup
    }

    /// Periodic corners, if any.
    pub fn corners(&self) -> Option<Corners> {
        self.corners
    }

    /// Interior neighbour weights used for boundary injection.
    pub fn weights(&self) -> NeighbourWeights {
        self.weights
    }

    /// Entry `M[row][col]`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn entry(&self, row: usize, col: usize) -> f64 {
        let n = self.dim();
        assert!(row < n && col < n, "entry ({row}, {col}) out of range for {n}x{n}");
        let mut v = if row == col {
            self.diag[row]
        } else if row == col + 1 {
            self.sub[col]
        } else if col == row + 1 {
            self.sup[row]
        } else {
            0.0
        };
        if let Some(c) = self.corners {
            if row == 0 && col == n - 1 {
                v += c.top_right;
            }
            if row == n - 1 && col == 0 {
                v += c.bottom_left;
            }
        }
        v
    }

    /// Dense row-major copy.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let n = self.dim();
        (0..n)
            .map(|r| (0..n).map(|c| self.entry(r, c)).collect())
            .collect()
    }

    /// `true` if every nonzero entry lies on the three central diagonals.
    pub fn is_tridiagonal(&self) -> bool {
        let n = self.dim();
        match self.corners {
            None => true,
            // Every entry of a 2x2 matrix lies in the band.
            Some(_) if n <= 2 => true,
            Some(c) => c.top_right == 0.0 && c.bottom_left == 0.0,
        }
    }

    /// Matrix-vector product `out = M x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `out` does not have length `n`.
    pub fn apply(&self, x: &[f64], out: &mut [f64]) {
        let n = self.dim();
        assert_eq!(x.len(), n, "input length");
        assert_eq!(out.len(), n, "output length");

        out[0] = self.diag[0] * x[0] + self.sup[0] * x[1];
        for i in 1..n - 1 {
            out[i] = self.sub[i - 1] * x[i - 1] + self.diag[i] * x[i] + self.sup[i] * x[i + 1];
        }
        out[n - 1] = self.sub[n - 2] * x[n - 2] + self.diag[n - 1] * x[n - 1];

        if let Some(c) = self.corners {
            out[0] += c.top_right * x[n - 1];
            out[n - 1] += c.bottom_left * x[0];
        }
    }
}

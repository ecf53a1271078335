//! Move-Split-Merge distance.

use ndarray::Array2;
use tracing::instrument;

use crate::error::{DistanceError, require_non_negative};
use crate::series::{TimeSeriesView, require_same_dims};
use crate::solver::min3;

/// Cost of a split or merge that inserts `new_point` next to neighbours `x` and `y`.
///
/// Just `c` when `new_point` lies between them (inclusive, either order),
/// otherwise `c` plus the distance to the nearer neighbour.
#[inline]
pub(crate) fn split_merge_cost(new_point: f64, x: f64, y: f64, c: f64) -> f64 {
    if (x <= new_point && new_point <= y) || (y <= new_point && new_point <= x) {
        c
    } else {
        c + (new_point - x).abs().min((new_point - y).abs())
    }
}

/// Move-Split-Merge configuration.
///
/// MSM is defined for scalar series; multivariate input is projected onto
/// the single dimension `dim`. A true multivariate MSM needs a different
/// cost definition.
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `c`       | 1.0     |
/// | `dim`     | 0       |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Msm {
    c: f64,
    dim: usize,
}

impl Default for Msm {
    fn default() -> Self {
        Self { c: 1.0, dim: 0 }
    }
}

impl Msm {
    /// Create an MSM calculator with split/merge cost `c` on dimension 0.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::InvalidParameter`] | `c` is negative, NaN, or infinite |
    pub fn new(c: f64) -> Result<Self, DistanceError> {
        Ok(Self {
            c: require_non_negative("c", c)?,
            dim: 0,
        })
    }

    /// Select the dimension to compare.
    #[must_use]
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = dim;
        self
    }

    /// Return the split/merge cost.
    #[must_use]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Return the selected dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Compute the MSM distance between two series over a full `m x n` grid.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::DimensionMismatch`] | `x` and `y` differ in `dims` |
    /// | [`DistanceError::DimensionOutOfRange`] | `dim >= dims` |
    #[instrument(level = "debug", skip(x, y), fields(l1 = x.len(), l2 = y.len()))]
    pub fn distance(
        &self,
        x: TimeSeriesView<'_>,
        y: TimeSeriesView<'_>,
    ) -> Result<f64, DistanceError> {
        require_same_dims(x, y)?;
        let xs = x.dimension(self.dim)?;
        let ys = y.dimension(self.dim)?;
        let (m, n) = (xs.len(), ys.len());
        let c = self.c;

        let mut cost = Array2::<f64>::zeros((m, n));
        cost[[0, 0]] = (xs[0] - ys[0]).abs();
        for i in 1..m {
            cost[[i, 0]] = cost[[i - 1, 0]] + split_merge_cost(xs[i], xs[i - 1], ys[0], c);
        }
        for j in 1..n {
            cost[[0, j]] = cost[[0, j - 1]] + split_merge_cost(ys[j], xs[0], ys[j - 1], c);
        }

        for i in 1..m {
            for j in 1..n {
                let moved = cost[[i - 1, j - 1]] + (xs[i] - ys[j]).abs();
                let split = cost[[i - 1, j]] + split_merge_cost(xs[i], xs[i - 1], ys[j], c);
                let merged = cost[[i, j - 1]] + split_merge_cost(ys[j], xs[i], ys[j - 1], c);
                cost[[i, j]] = min3(moved, split, merged);
            }
        }

        Ok(cost[[m - 1, n - 1]])
    }
}

/// MSM distance with split/merge cost `c` on dimension `dim`.
///
/// # Errors
///
/// See [`Msm::new`] and [`Msm::distance`].
pub fn msm_distance(
    x: TimeSeriesView<'_>,
    y: TimeSeriesView<'_>,
    c: f64,
    dim: usize,
) -> Result<f64, DistanceError> {
    Msm::new(c)?.with_dim(dim).distance(x, y)
}

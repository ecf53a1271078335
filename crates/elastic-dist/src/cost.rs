//! Point-wise cost matrix with an unreachable boundary row and column.

use std::ops::{Index, IndexMut};

use ndarray::{Array2, Zip};

use crate::error::DistanceError;
use crate::series::{TimeSeriesView, require_same_dims};

/// A `(l1 + 1) x (l2 + 1)` grid of costs.
///
/// Cell `(i + 1, j + 1)` starts as the squared Euclidean distance between
/// time step `i` of the first series and time step `j` of the second. Row 0
/// and column 0 hold `+inf` except `(0, 0)`, which holds 0, so the first real
/// row and column can only be entered from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix(Array2<f64>);

impl CostMatrix {
    /// Build the squared Euclidean cost matrix between `x` and `y`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::DimensionMismatch`] | `x` and `y` differ in `dims` |
    pub fn squared_euclidean(
        x: TimeSeriesView<'_>,
        y: TimeSeriesView<'_>,
    ) -> Result<Self, DistanceError> {
        require_same_dims(x, y)?;
        let (l1, l2) = (x.len(), y.len());

        let mut grid = Array2::from_elem((l1 + 1, l2 + 1), f64::INFINITY);
        grid[[0, 0]] = 0.0;
        for i in 0..l1 {
            let xi = x.step(i);
            for j in 0..l2 {
                grid[[i + 1, j + 1]] = Zip::from(&xi)
                    .and(&y.step(j))
                    .fold(0.0, |acc, &a, &b| acc + (a - b) * (a - b));
            }
        }
        Ok(Self(grid))
    }

    /// Return `(rows, cols)`, i.e. `(l1 + 1, l2 + 1)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.0.dim()
    }

    /// Return the bottom-right cell.
    #[must_use]
    pub fn terminal(&self) -> f64 {
        let (rows, cols) = self.shape();
        self.0[[rows - 1, cols - 1]]
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.0[[i, j]]
    }
}

impl IndexMut<(usize, usize)> for CostMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.0[[i, j]]
    }
}

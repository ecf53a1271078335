//! Longest Common Subsequence distance with a matching tolerance.

use ndarray::Array2;
use tracing::instrument;

use crate::error::{DistanceError, require_non_negative};
use crate::series::{TimeSeriesView, require_same_dims, shorter_first};

/// LCSS configuration.
///
/// Two points match when they differ by at most `epsilon`; only pairs whose
/// time steps are at most `delta` apart are compared. The distance is
/// `1 - matches / m`, with `m` the shorter length, so it lies in `[0, 1]`.
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `delta`   | 3       |
/// | `epsilon` | 0.05    |
/// | `dim`     | 0       |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lcss {
    delta: usize,
    epsilon: f64,
    dim: usize,
}

impl Default for Lcss {
    fn default() -> Self {
        Self {
            delta: 3,
            epsilon: 0.05,
            dim: 0,
        }
    }
}

impl Lcss {
    /// Create an LCSS calculator with window `delta` and tolerance `epsilon` on dimension 0.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::InvalidParameter`] | `epsilon` is negative, NaN, or infinite |
    pub fn new(delta: usize, epsilon: f64) -> Result<Self, DistanceError> {
        Ok(Self {
            delta,
            epsilon: require_non_negative("epsilon", epsilon)?,
            dim: 0,
        })
    }

    /// Select the dimension to compare.
    #[must_use]
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = dim;
        self
    }

    /// Return the window half-width.
    #[must_use]
    pub fn delta(&self) -> usize {
        self.delta
    }

    /// Return the matching tolerance.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Return the selected dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Compute the LCSS distance between two series.
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
        let (x, y) = shorter_first(x, y);
        let xs = x.dimension(self.dim)?;
        let ys = y.dimension(self.dim)?;
        let (m, n) = (xs.len(), ys.len());

        let mut lcss = Array2::<usize>::zeros((m + 1, n + 1));
        for i in 0..m {
            // Window columns before 0 or past n - 1 are skipped.
            let lo = i.saturating_sub(self.delta);
            let hi = i.saturating_add(self.delta).min(n - 1);
            for j in lo..=hi {
                // Tolerance is tested on the rounded difference, not as
                // `y - epsilon <= x <= y + epsilon`.
                lcss[[i + 1, j + 1]] = if (xs[i] - ys[j]).abs() <= self.epsilon {
                    lcss[[i, j]] + 1
                } else {
                    lcss[[i, j + 1]].max(lcss[[i + 1, j]])
                };
            }
        }

        let matches = lcss.row(m).iter().skip(1).copied().max().unwrap_or(0);
        Ok(1.0 - matches as f64 / m as f64)
    }
}

/// LCSS distance with window `delta` and tolerance `epsilon` on dimension `dim`.
///
/// # Errors
///
/// See [`Lcss::new`] and [`Lcss::distance`].
pub fn lcss_distance(
    x: TimeSeriesView<'_>,
    y: TimeSeriesView<'_>,
    delta: usize,
    epsilon: f64,
    dim: usize,
) -> Result<f64, DistanceError> {
    Lcss::new(delta, epsilon)?.with_dim(dim).distance(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::TimeSeries;

    fn uni(values: Vec<f64>) -> TimeSeries {
        TimeSeries::univariate(values).unwrap()
    }

    #[test]
    fn identical_series_distance_zero() {
        let ts = uni(vec![0.3, -1.0, 2.5, 2.5, 7.0]);
        for delta in [0, 1, 10] {
            let d = lcss_distance(ts.as_view(), ts.as_view(), delta, 0.0, 0).unwrap();
            assert_eq!(d, 0.0, "delta = {delta}");
        }
    }

    #[test]
    fn large_epsilon_matches_everything() {
        let a = uni(vec![0.0, 100.0, -50.0]);
        let b = uni(vec![9.0, -9.0, 3.0, 4.0]);
        let d = lcss_distance(a.as_view(), b.as_view(), 0, 1e6, 0).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn no_matches_is_one() {
        let a = uni(vec![0.0, 0.0, 0.0]);
        let b = uni(vec![5.0, 5.0, 5.0]);
        let d = lcss_distance(a.as_view(), b.as_view(), 3, 0.5, 0).unwrap();
        assert_eq!(d, 1.0);
    }

    #[test]
    fn hand_computed_half_match() {
        // Only the first two points match within 0.1.
        let a = uni(vec![1.0, 2.0, 3.0, 4.0]);
        let b = uni(vec![1.05, 2.0, 9.0, 9.0]);
        let d = lcss_distance(a.as_view(), b.as_view(), 1, 0.1, 0).unwrap();
        assert_eq!(d, 0.5);
    }

    #[test]
    fn window_limits_shifted_matches() {
        // b is a shifted by two steps; a window of 1 cannot reach the shift.
        let a = uni(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = uni(vec![0.0, 0.0, 1.0, 2.0, 3.0]);
        let narrow = lcss_distance(a.as_view(), b.as_view(), 1, 0.0, 0).unwrap();
        let wide = lcss_distance(a.as_view(), b.as_view(), 2, 0.0, 0).unwrap();
        assert_eq!(narrow, 1.0);
        assert!((wide - 0.4).abs() < 1e-12, "got {wide}");
    }

    #[test]
    fn tolerance_compares_absolute_difference() {
        // Exactly representable gap equal to epsilon matches.
        let a = uni(vec![0.0]);
        let b = uni(vec![0.5]);
        assert_eq!(lcss_distance(a.as_view(), b.as_view(), 0, 0.5, 0).unwrap(), 0.0);

        // |1.0 - 1.1| rounds to just above 0.1, so no match.
        let a = uni(vec![1.0]);
        let b = uni(vec![1.1]);
        assert!((1.0_f64 - 1.1).abs() > 0.1);
        assert_eq!(lcss_distance(a.as_view(), b.as_view(), 0, 0.1, 0).unwrap(), 1.0);
    }

    #[test]
    fn bounded_in_unit_interval() {
        let a = uni(vec![0.0, 1.0, 2.0, 1.0, 0.0, -1.0]);
        let b = uni(vec![0.1, 2.0, 1.1, 0.0]);
        for delta in [0, 1, 2, 5] {
            for epsilon in [0.0, 0.15, 1.0] {
                let d = lcss_distance(a.as_view(), b.as_view(), delta, epsilon, 0).unwrap();
                assert!((0.0..=1.0).contains(&d), "delta {delta} eps {epsilon}: {d}");
            }
        }
    }

    #[test]
    fn rejects_negative_epsilon() {
        let a = uni(vec![0.0]);
        assert!(matches!(
            lcss_distance(a.as_view(), a.as_view(), 1, -0.1, 0),
            Err(DistanceError::InvalidParameter { name: "epsilon", .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_dim() {
        let a = uni(vec![0.0]);
        assert!(matches!(
            lcss_distance(a.as_view(), a.as_view(), 1, 0.1, 3),
            Err(DistanceError::DimensionOutOfRange { dim: 3, dims: 1 })
        ));
    }
}

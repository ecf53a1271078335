//! Weighted DTW and its derivative variant.

use tracing::instrument;

use crate::cost::CostMatrix;
use crate::error::{DistanceError, require_finite};
use crate::preprocess::derivative;
use crate::series::{TimeSeriesView, require_same_dims, shorter_first};
use crate::solver::BandedSolver;
use crate::weights::WeightVector;

/// Weighted DTW configuration.
///
/// Each cell's point-wise cost is scaled by a logistic weight of its distance
/// from the diagonal, `1 / (1 + exp(-g * (|i - j| - n/2)))` with `n` the
/// shorter length. Alignment is otherwise unconstrained.
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `g`       | 0.05    |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wdtw {
    g: f64,
}

impl Default for Wdtw {
    fn default() -> Self {
        Self { g: 0.05 }
    }
}

impl Wdtw {
    /// Create a WDTW calculator with weight steepness `g`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::InvalidParameter`] | `g` is NaN or infinite |
    pub fn new(g: f64) -> Result<Self, DistanceError> {
        Ok(Self {
            g: require_finite("g", g)?,
        })
    }

    /// Return the weight steepness.
    #[must_use]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Compute the WDTW distance between two series.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::DimensionMismatch`] | `x` and `y` differ in `dims` |
    #[instrument(level = "debug", skip(x, y), fields(l1 = x.len(), l2 = y.len(), dims = x.dims()))]
    pub fn distance(
        &self,
        x: TimeSeriesView<'_>,
        y: TimeSeriesView<'_>,
    ) -> Result<f64, DistanceError> {
        require_same_dims(x, y)?;
        let (x, y) = shorter_first(x, y);
        // Offsets reach l2 - 1, past the n-entry vector when lengths differ.
        let weights = WeightVector::logistic_extended(self.g, x.len(), y.len());
        let cost = CostMatrix::squared_euclidean(x, y)?;
        Ok(BandedSolver::new(y.len())
            .with_weights(&weights)
            .solve(cost))
    }
}

/// Weighted derivative DTW: WDTW over the first-order differences of both series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Wddtw {
    wdtw: Wdtw,
}

impl Wddtw {
    /// Wrap a WDTW configuration.
    #[must_use]
    pub fn new(wdtw: Wdtw) -> Self {
        Self { wdtw }
    }

    /// Return the underlying WDTW configuration.
    #[must_use]
    pub fn wdtw(&self) -> Wdtw {
        self.wdtw
    }

    /// Compute the WDDTW distance between two series.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::DimensionMismatch`] | `x` and `y` differ in `dims` |
    /// | [`DistanceError::Shape`] | Either series has fewer than 2 time steps |
    #[instrument(level = "debug", skip(x, y), fields(l1 = x.len(), l2 = y.len(), dims = x.dims()))]
    pub fn distance(
        &self,
        x: TimeSeriesView<'_>,
        y: TimeSeriesView<'_>,
    ) -> Result<f64, DistanceError> {
        require_same_dims(x, y)?;
        let dx = derivative(x)?;
        let dy = derivative(y)?;
        self.wdtw.distance(dx.as_view(), dy.as_view())
    }
}

/// WDTW distance with weight steepness `g`.
///
/// # Errors
///
/// See [`Wdtw::new`] and [`Wdtw::distance`].
pub fn wdtw_distance(
    x: TimeSeriesView<'_>,
    y: TimeSeriesView<'_>,
    g: f64,
) -> Result<f64, DistanceError> {
    Wdtw::new(g)?.distance(x, y)
}

/// WDDTW distance with weight steepness `g`.
///
/// # Errors
///
/// See [`Wdtw::new`] and [`Wddtw::distance`].
pub fn wddtw_distance(
    x: TimeSeriesView<'_>,
    y: TimeSeriesView<'_>,
    g: f64,
) -> Result<f64, DistanceError> {
    Wddtw::new(Wdtw::new(g)?).distance(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtw::dtw_distance;
    use crate::series::TimeSeries;

    fn uni(values: Vec<f64>) -> TimeSeries {
        TimeSeries::univariate(values).unwrap()
    }

    #[test]
    fn identical_series_distance_zero() {
        let ts = uni(vec![1.0, 4.0, 2.0, 8.0]);
        let d = wdtw_distance(ts.as_view(), ts.as_view(), 0.3).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn single_point_weighted_at_offset_zero() {
        // n = 1, offset 0: weight = 1 / (1 + exp(-g * (0 - 0.5)))
        let a = uni(vec![1.0]);
        let b = uni(vec![3.0]);
        let g = 2.0;
        let weight = 1.0 / (1.0 + (g * 0.5_f64).exp());
        let d = wdtw_distance(a.as_view(), b.as_view(), g).unwrap();
        assert!((d - 4.0 * weight).abs() < 1e-12, "got {d}");
    }

    #[test]
    fn hand_computed_unequal_lengths() {
        // x = [0, 2], y = [1, 1, 3], g = 1, n = 2 so the midpoint is 1.
        // w0 = 1 / (1 + e), w1 = 0.5; offset 2 is only reached at (1,3).
        // Every point-wise cost on the optimal path is 1:
        // (1,1) w0, (2,2) w0, (2,3) w1 -> 0.5 + 2 * w0.
        let w0 = 1.0 / (1.0 + 1.0_f64.exp());
        let a = uni(vec![0.0, 2.0]);
        let b = uni(vec![1.0, 1.0, 3.0]);
        let ab = wdtw_distance(a.as_view(), b.as_view(), 1.0).unwrap();
        let ba = wdtw_distance(b.as_view(), a.as_view(), 1.0).unwrap();
        assert!((ab - (0.5 + 2.0 * w0)).abs() < 1e-12, "got {ab}");
        assert_eq!(ab, ba);
    }

    #[test]
    fn wddtw_hand_computed() {
        // Derivatives are [0, 2] and [1, 1, 3], the pair above.
        let w0 = 1.0 / (1.0 + 1.0_f64.exp());
        let a = uni(vec![0.0, 0.0, 2.0]);
        let b = uni(vec![0.0, 1.0, 2.0, 5.0]);
        let d = wddtw_distance(a.as_view(), b.as_view(), 1.0).unwrap();
        assert!((d - (0.5 + 2.0 * w0)).abs() < 1e-12, "got {d}");
    }

    #[test]
    fn zero_steepness_halves_dtw() {
        let a = uni(vec![0.0, 2.0, 1.0, 3.0, 5.0]);
        let b = uni(vec![1.0, 1.0, 2.0, 4.0]);
        let weighted = wdtw_distance(a.as_view(), b.as_view(), 0.0).unwrap();
        let plain = dtw_distance(a.as_view(), b.as_view(), -1.0).unwrap();
        assert!((weighted - plain / 2.0).abs() < 1e-12);
    }

    #[test]
    fn unequal_lengths_finite_and_symmetric() {
        let a = uni(vec![0.0, 1.0]);
        let b = uni(vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);
        let ab = wdtw_distance(a.as_view(), b.as_view(), 0.5).unwrap();
        let ba = wdtw_distance(b.as_view(), a.as_view(), 0.5).unwrap();
        assert!(ab.is_finite() && ab >= 0.0);
        assert_eq!(ab, ba);
    }

    #[test]
    fn rejects_infinite_g() {
        assert!(matches!(
            Wdtw::new(f64::INFINITY),
            Err(DistanceError::InvalidParameter { name: "g", .. })
        ));
    }

    #[test]
    fn wddtw_matches_wdtw_on_derivatives() {
        let a = uni(vec![0.0, 1.0, 3.0, 6.0, 4.0]);
        let b = uni(vec![2.0, 1.0, 2.0, 3.0]);
        let da = derivative(a.as_view()).unwrap();
        let db = derivative(b.as_view()).unwrap();
        let direct = wddtw_distance(a.as_view(), b.as_view(), 0.1).unwrap();
        let composed = wdtw_distance(da.as_view(), db.as_view(), 0.1).unwrap();
        assert_eq!(direct, composed);
    }

    #[test]
    fn default_steepness() {
        assert_eq!(Wdtw::default().g(), 0.05);
    }
}

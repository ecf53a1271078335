//! Dynamic Time Warping and its derivative variant.

use tracing::instrument;

use crate::constraint::BandConstraint;
use crate::cost::CostMatrix;
use crate::error::DistanceError;
use crate::preprocess::derivative;
use crate::series::{TimeSeriesView, require_same_dims, shorter_first};
use crate::solver::BandedSolver;

/// Immutable DTW configuration. Thread-safe and copyable.
///
/// The distance is the accumulated squared Euclidean cost of the optimal
/// alignment, with no final square root.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dtw {
    constraint: BandConstraint,
}

impl Dtw {
    /// Create an unconstrained DTW calculator.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self {
            constraint: BandConstraint::Unconstrained,
        }
    }

    /// Create a DTW calculator with an absolute Sakoe-Chiba half-width.
    #[must_use]
    pub fn with_sakoe_chiba(radius: usize) -> Self {
        Self {
            constraint: BandConstraint::SakoeChibaRadius(radius),
        }
    }

    /// Create a DTW calculator whose half-width is `round(w * max(l1, l2))`.
    /// Any negative `w` means unconstrained.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::InvalidParameter`] | `w` is NaN or infinite |
    pub fn with_window(w: f64) -> Result<Self, DistanceError> {
        Self::from_constraint(BandConstraint::from_window(w))
    }

    /// Create a DTW calculator from an existing [`BandConstraint`].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::InvalidParameter`] | A fractional window is NaN or infinite |
    pub fn from_constraint(constraint: BandConstraint) -> Result<Self, DistanceError> {
        Ok(Self {
            constraint: constraint.validate()?,
        })
    }

    /// Return the band constraint configuration.
    #[must_use]
    pub fn constraint(&self) -> BandConstraint {
        self.constraint
    }

    /// Compute the DTW distance between two series.
    ///
    /// The shorter series is aligned along the rows; the result does not
    /// depend on argument order. Returns `f64::INFINITY` when the band is too
    /// narrow to connect the two ends.
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
        let band = self.constraint.half_width(x.len(), y.len());
        let cost = CostMatrix::squared_euclidean(x, y)?;
        Ok(BandedSolver::new(band).solve(cost))
    }
}

/// Derivative DTW: DTW over the first-order differences of both series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ddtw {
    dtw: Dtw,
}

impl Ddtw {
    /// Wrap a DTW configuration; its band is applied to the derivatives unchanged.
    #[must_use]
    pub fn new(dtw: Dtw) -> Self {
        Self { dtw }
    }

    /// Return the underlying DTW configuration.
    #[must_use]
    pub fn dtw(&self) -> Dtw {
        self.dtw
    }

    /// Compute the DDTW distance between two series.
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
        self.dtw.distance(dx.as_view(), dy.as_view())
    }
}

/// DTW distance with window fraction `w` (negative for unconstrained).
///
/// # Errors
///
/// See [`Dtw::with_window`] and [`Dtw::distance`].
pub fn dtw_distance(
    x: TimeSeriesView<'_>,
    y: TimeSeriesView<'_>,
    w: f64,
) -> Result<f64, DistanceError> {
    Dtw::with_window(w)?.distance(x, y)
}

/// DDTW distance with window fraction `w` (negative for unconstrained).
///
/// # Errors
///
/// See [`Dtw::with_window`] and [`Ddtw::distance`].
pub fn ddtw_distance(
    x: TimeSeriesView<'_>,
    y: TimeSeriesView<'_>,
    w: f64,
) -> Result<f64, DistanceError> {
    Ddtw::new(Dtw::with_window(w)?).distance(x, y)
}

//! Multivariate time series types with validation guarantees.

use std::ops::Index;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use tracing::trace;

use crate::error::{DistanceError, ShapeError};

/// Check the shared invariants: at least one time step, at least one
/// dimension, every value finite.
fn validate(values: &ArrayView2<'_, f64>) -> Result<(), ShapeError> {
    let (len, dims) = values.dim();
    if len == 0 {
        return Err(ShapeError::EmptySeries);
    }
    if dims == 0 {
        return Err(ShapeError::NoDimensions);
    }
    if let Some(((index, dim), _)) = values.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(ShapeError::NonFiniteValue { index, dim });
    }
    Ok(())
}

/// Owned, validated multivariate time series of shape `(length, dims)`.
///
/// Guaranteed to hold at least one time step and one dimension, with all
/// values finite.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries(Array2<f64>);

impl TimeSeries {
    /// Create a new time series from a `(length, dims)` array.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ShapeError::EmptySeries`] | `values` has zero rows |
    /// | [`ShapeError::NoDimensions`] | `values` has zero columns |
    /// | [`ShapeError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(values: Array2<f64>) -> Result<Self, ShapeError> {
        validate(&values.view())?;
        Ok(Self(values))
    }

    /// Create a univariate series, shaped `(values.len(), 1)`.
    ///
    /// # Errors
    ///
    /// Same as [`TimeSeries::new`].
    pub fn univariate(values: Vec<f64>) -> Result<Self, ShapeError> {
        Self::new(Array1::from(values).insert_axis(Axis(1)))
    }

    /// Create a series from one `Vec` per time step.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ShapeError::EmptySeries`] | `rows` is empty |
    /// | [`ShapeError::RaggedRows`] | Rows differ in width |
    /// | [`ShapeError::NoDimensions`] | Rows are empty |
    /// | [`ShapeError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> {
        let expected = rows.first().ok_or(ShapeError::EmptySeries)?.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, width)| width != expected)
        {
            return Err(ShapeError::RaggedRows {
                row,
                expected,
                found,
            });
        }
        Self::new(Array2::from_shape_fn((rows.len(), expected), |(t, d)| {
            rows[t][d]
        }))
    }

    /// Borrow this series as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> TimeSeriesView<'_> {
        TimeSeriesView::new_unchecked(self.0.view())
    }

    /// Return the number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    /// Return true if the series has no time steps.
    ///
    /// Always `false` for a [`TimeSeries`] built through its constructors;
    /// provided to satisfy the `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.nrows() == 0
    }

    /// Return the number of dimensions per time step.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.0.ncols()
    }

    /// Consume and return the inner array.
    #[must_use]
    pub fn into_inner(self) -> Array2<f64> {
        self.0
    }
}

impl TryFrom<Array2<f64>> for TimeSeries {
    type Error = ShapeError;

    fn try_from(values: Array2<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

/// Borrowed, validated view into a multivariate time series. Zero-copy.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesView<'a>(ArrayView2<'a, f64>);

impl<'a> TimeSeriesView<'a> {
    /// Create a new view over a `(length, dims)` array, validating it.
    ///
    /// # Errors
    ///
    /// Same as [`TimeSeries::new`].
    pub fn new(values: ArrayView2<'a, f64>) -> Result<Self, ShapeError> {
        validate(&values)?;
        Ok(Self(values))
    }

    /// Create a view without validation. For internal use where data is already validated.
    pub(crate) fn new_unchecked(values: ArrayView2<'a, f64>) -> Self {
        Self(values)
    }

    /// Return the underlying array view.
    #[must_use]
    pub fn as_array(&self) -> ArrayView2<'a, f64> {
        self.0
    }

    /// Shorten the borrow to `'b`.
    ///
    /// [`ArrayView2`] is invariant over its lifetime, so two views with
    /// unrelated lifetimes must be reborrowed before they can share one.
    #[must_use]
    pub fn reborrow<'b>(self) -> TimeSeriesView<'b>
    where
        'a: 'b,
    {
        TimeSeriesView(self.0.reborrow())
    }

    /// Return the number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    /// Return true if the view has no time steps. Always `false` for validated views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.nrows() == 0
    }

    /// Return the number of dimensions per time step.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.0.ncols()
    }

    /// Return the values of time step `t` across all dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `t >= len()`.
    #[must_use]
    pub fn step(&self, t: usize) -> ArrayView1<'a, f64> {
        self.0.index_axis_move(Axis(0), t)
    }

    /// Project the series onto a single dimension.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::DimensionOutOfRange`] | `dim >= dims()` |
    pub fn dimension(&self, dim: usize) -> Result<ArrayView1<'a, f64>, DistanceError> {
        if dim >= self.dims() {
            return Err(DistanceError::DimensionOutOfRange {
                dim,
                dims: self.dims(),
            });
        }
        Ok(self.0.index_axis_move(Axis(1), dim))
    }
}

impl Index<(usize, usize)> for TimeSeriesView<'_> {
    type Output = f64;

    fn index(&self, (t, dim): (usize, usize)) -> &Self::Output {
        &self.0[[t, dim]]
    }
}

/// Fail with [`DistanceError::DimensionMismatch`] unless both series share `dims`.
pub(crate) fn require_same_dims(
    x: TimeSeriesView<'_>,
    y: TimeSeriesView<'_>,
) -> Result<usize, DistanceError> {
    if x.dims() != y.dims() {
        return Err(DistanceError::DimensionMismatch {
            left: x.dims(),
            right: y.dims(),
        });
    }
    Ok(x.dims())
}

/// Order a pair so the first series is no longer than the second.
pub(crate) fn shorter_first<'a, 'x: 'a, 'y: 'a>(
    x: TimeSeriesView<'x>,
    y: TimeSeriesView<'y>,
) -> (TimeSeriesView<'a>, TimeSeriesView<'a>) {
    let (x, y) = (x.reborrow(), y.reborrow());
    if y.len() < x.len() {
        trace!(l1 = x.len(), l2 = y.len(), "swapping inputs, shorter series first");
        (y, x)
    } else {
        (x, y)
    }
}

//! Time series preprocessing: first-order derivative and z-normalization.

use ndarray::{Axis, s};

use crate::error::ShapeError;
use crate::series::{TimeSeries, TimeSeriesView};

/// Compute the first-order difference of a series along the time axis.
///
/// Output time step `t` is `x[t + 1] - x[t]`, independently per dimension.
/// Output length is `len - 1`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ShapeError::TooShort`] | Series has fewer than 2 time steps |
pub fn derivative(series: TimeSeriesView<'_>) -> Result<TimeSeries, ShapeError> {
    let len = series.len();
    if len < 2 {
        return Err(ShapeError::TooShort { len, min: 2 });
    }

    let data = series.as_array();
    let diff = &data.slice(s![1.., ..]) - &data.slice(s![..-1, ..]);
    TimeSeries::new(diff)
}

/// Z-normalize each dimension independently to zero mean and unit variance.
///
/// Uses population standard deviation (divides by n, not n-1).
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ShapeError::ConstantDimension`] | Some dimension has zero variance |
pub fn z_normalize(series: TimeSeriesView<'_>) -> Result<TimeSeries, ShapeError> {
    let data = series.as_array();
    let mut normalized = data.to_owned();

    for (dim, mut column) in normalized.axis_iter_mut(Axis(1)).enumerate() {
        let n = column.len() as f64;
        let mean = column.sum() / n;
        let variance = column.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();

        if std == 0.0 {
            return Err(ShapeError::ConstantDimension {
                dim,
                value: column[0],
            });
        }
        column.mapv_inplace(|x| (x - mean) / std);
    }

    TimeSeries::new(normalized)
}

/// Z-normalize a batch of time series.
///
/// # Errors
///
/// Returns the first [`ShapeError`] encountered.
pub fn z_normalize_batch(series: &[TimeSeries]) -> Result<Vec<TimeSeries>, ShapeError> {
    series.iter().map(|s| z_normalize(s.as_view())).collect()
}

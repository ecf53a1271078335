//! Error types for series validation and distance computation.

/// Errors from time series construction and shape-changing transforms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// Returned when a series has no time steps.
    #[error("time series must have at least one time step")]
    EmptySeries,

    /// Returned when a series has time steps but zero dimensions.
    #[error("time series must have at least one dimension")]
    NoDimensions,

    /// Returned when rows passed to [`TimeSeries::from_rows`] differ in width.
    ///
    /// [`TimeSeries::from_rows`]: crate::TimeSeries::from_rows
    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRows {
        /// Index of the first offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// Returned when a series contains NaN, infinity, or negative infinity.
    #[error("time series contains non-finite value at time step {index}, dimension {dim}")]
    NonFiniteValue {
        /// Time step of the first non-finite value found.
        index: usize,
        /// Dimension of the first non-finite value found.
        dim: usize,
    },

    /// Returned when a transform needs more time steps than the series has.
    #[error("time series of length {len} is too short, need at least {min}")]
    TooShort {
        /// Length of the series provided.
        len: usize,
        /// Minimum length the transform accepts.
        min: usize,
    },

    /// Returned when z-normalizing a dimension with zero variance.
    #[error("dimension {dim} is constant (value {value}), cannot z-normalize")]
    ConstantDimension {
        /// The constant dimension.
        dim: usize,
        /// The value every time step holds in that dimension.
        value: f64,
    },
}

/// Errors from elastic distance computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistanceError {
    /// Wraps a shape error raised while preparing the inputs.
    #[error("invalid input shape: {0}")]
    Shape(#[from] ShapeError),

    /// Returned when the two series do not share the same number of dimensions.
    #[error("series dimensions differ: {left} vs {right}")]
    DimensionMismatch {
        /// Dimensions of the first series.
        left: usize,
        /// Dimensions of the second series.
        right: usize,
    },

    /// Returned when a measure parameter is NaN, infinite, or out of its domain.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the public API.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Which constraint the value violates.
        reason: &'static str,
    },

    /// Returned when a single-dimension measure selects a dimension the series lacks.
    #[error("dimension {dim} is out of range for series with {dims} dimensions")]
    DimensionOutOfRange {
        /// The selected dimension.
        dim: usize,
        /// Dimensions of the series.
        dims: usize,
    },

    /// Returned when parsing a [`Measure`](crate::Measure) from an unrecognized name.
    #[error("unknown elastic distance measure `{name}`")]
    UnknownMeasure {
        /// The name that failed to parse.
        name: String,
    },
}

/// Reject NaN and infinite parameter values.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, DistanceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistanceError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

/// Reject non-finite and negative parameter values.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, DistanceError> {
    require_finite(name, value)?;
    if value < 0.0 {
        return Err(DistanceError::InvalidParameter {
            name,
            value,
            reason: "must be non-negative",
        });
    }
    Ok(value)
}

/// Reject non-finite, zero, and negative parameter values.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, DistanceError> {
    require_finite(name, value)?;
    if value <= 0.0 {
        return Err(DistanceError::InvalidParameter {
            name,
            value,
            reason: "must be positive",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_accepts_negative() {
        assert_eq!(require_finite("w", -1.0), Ok(-1.0));
    }

    #[test]
    fn finite_rejects_nan() {
        let result = require_finite("g", f64::NAN);
        assert!(matches!(
            result,
            Err(DistanceError::InvalidParameter { name: "g", .. })
        ));
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(require_non_negative("epsilon", 0.0), Ok(0.0));
    }

    #[test]
    fn non_negative_rejects_negative() {
        let result = require_non_negative("epsilon", -0.1);
        assert!(matches!(
            result,
            Err(DistanceError::InvalidParameter {
                name: "epsilon",
                reason: "must be non-negative",
                ..
            })
        ));
    }

    #[test]
    fn positive_rejects_zero_and_infinity() {
        assert!(require_positive("band_size", 0.0).is_err());
        assert!(require_positive("band_size", f64::INFINITY).is_err());
        assert_eq!(require_positive("band_size", 0.5), Ok(0.5));
    }

    #[test]
    fn shape_error_converts() {
        let err: DistanceError = ShapeError::EmptySeries.into();
        assert_eq!(err, DistanceError::Shape(ShapeError::EmptySeries));
    }

    #[test]
    fn display_messages() {
        let err = DistanceError::DimensionMismatch { left: 2, right: 3 };
        assert_eq!(err.to_string(), "series dimensions differ: 2 vs 3");
        let err = ShapeError::TooShort { len: 1, min: 2 };
        assert_eq!(
            err.to_string(),
            "time series of length 1 is too short, need at least 2"
        );
    }
}
